//! Defines the AST for a SELECT query.

use crate::ast::{common::OrderDir, expr::Expr};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns or expressions to be returned,
    /// e.g. `id`, `name`, `COUNT(*)`.
    pub columns: Vec<Expr>,

    /// The primary table for the query.
    pub from: Option<String>,

    /// The WHERE clause condition.
    pub where_clause: Option<Expr>,

    /// The ORDER BY clause, applied in listed sequence.
    pub order_by: Vec<OrderByExpr>,

    /// The LIMIT clause, bound as a parameter.
    pub limit: Option<Expr>,

    /// The OFFSET clause, bound as a parameter.
    pub offset: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: OrderDir,
}
