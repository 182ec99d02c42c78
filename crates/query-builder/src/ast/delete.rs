//! Defines the AST for a DELETE statement.

use crate::ast::expr::Expr;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Delete {
    pub table: String,

    /// The WHERE clause condition; absent means every row.
    pub where_clause: Option<Expr>,

    /// Expressions for a RETURNING clause; empty means none.
    pub returning: Vec<Expr>,
}
