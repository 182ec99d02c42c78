//! Defines the AST for an INSERT statement.

use crate::ast::expr::Expr;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// The column list, shared by every row of values.
    pub columns: Vec<String>,

    /// One entry per row; multiple entries form a batch insert.
    pub values: Vec<Vec<Expr>>,

    /// Expressions for a RETURNING clause; empty means none.
    pub returning: Vec<Expr>,
}
