//! The filter language, reified as a closed set of variants instead of the
//! stringly-keyed mappings the model layer speaks.

use crate::{core::value::Value, filter::error::FilterError};
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// A range with inclusive bounds. An inverted range is legal and simply
/// matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub from: Value,
    pub to: Value,
}

/// Bindings for a raw predicate fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBindings {
    /// Substituted for `?` placeholders, in order.
    Positional(Vec<Value>),
    /// Substituted for `:name` placeholders.
    Named(Vec<(String, Value)>),
}

/// A filter that resolves asynchronously. The only construct that introduces
/// a suspension point into compilation; a rejected future surfaces as a
/// compilation failure.
pub struct DeferredFilter(BoxFuture<'static, Result<FilterExpr, FilterError>>);

impl DeferredFilter {
    pub fn new(
        future: impl Future<Output = Result<FilterExpr, FilterError>> + Send + 'static,
    ) -> Self {
        DeferredFilter(Box::pin(future))
    }

    pub async fn resolve(self) -> Result<FilterExpr, FilterError> {
        self.0.await
    }
}

impl fmt::Debug for DeferredFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredFilter(..)")
    }
}

/// A filter expression. Property filters conjoin implicit equality over
/// their pairs; everything else maps one-to-one onto the operator
/// vocabulary.
#[derive(Debug)]
pub enum FilterExpr {
    Properties(Vec<(String, Value)>),
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
    In { column: String, values: Vec<Value> },
    NotIn { column: String, values: Vec<Value> },
    Null(String),
    NotNull(String),
    Between { column: String, range: Range },
    NotBetween { column: String, range: Range },
    Gt { column: String, value: Value },
    Gte { column: String, value: Value },
    Lt { column: String, value: Value },
    Lte { column: String, value: Value },
    Raw { query: String, bindings: RawBindings },
    Deferred(DeferredFilter),
}

impl FilterExpr {
    /// The filter that matches every row.
    pub fn matches_all() -> Self {
        FilterExpr::And(Vec::new())
    }

    /// Single-column equality.
    pub fn property(column: &str, value: Value) -> Self {
        FilterExpr::Properties(vec![(column.to_string(), value)])
    }

    pub fn not(filter: FilterExpr) -> Self {
        FilterExpr::Not(Box::new(filter))
    }

    /// Wraps a future that will produce the actual filter.
    pub fn deferred(
        future: impl Future<Output = Result<FilterExpr, FilterError>> + Send + 'static,
    ) -> Self {
        FilterExpr::Deferred(DeferredFilter::new(future))
    }
}
