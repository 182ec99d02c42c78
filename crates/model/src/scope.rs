use crate::filter::expr::FilterExpr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One ordering key. Specs apply in listed sequence; the first entry is the
/// primary sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// One query's worth of table, filter, ordering, and pagination. Built right
/// before a connector call and consumed by it.
#[derive(Debug)]
pub struct Scope {
    pub table: String,
    pub filter: Option<FilterExpr>,
    pub order: Vec<OrderSpec>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl Scope {
    pub fn table(name: &str) -> ScopeBuilder {
        ScopeBuilder {
            table: name.to_string(),
            filter: None,
            order: Vec::new(),
            limit: None,
            skip: None,
        }
    }
}

pub struct ScopeBuilder {
    table: String,
    filter: Option<FilterExpr>,
    order: Vec<OrderSpec>,
    limit: Option<u64>,
    skip: Option<u64>,
}

impl ScopeBuilder {
    pub fn filter(mut self, filter: FilterExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order(mut self, key: &str, direction: SortDirection) -> Self {
        self.order.push(OrderSpec {
            key: key.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn build(self) -> Scope {
        Scope {
            table: self.table,
            filter: self.filter,
            order: self.order,
            limit: self.limit,
            skip: self.skip,
        }
    }
}
