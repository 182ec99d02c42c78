//! Provides a fluent builder for constructing `Delete` ASTs.

use crate::ast::{delete::Delete, expr::Expr};

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    ast: Delete,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Delete {
                table: table.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(condition);
        self
    }

    pub fn returning(mut self, columns: Vec<Expr>) -> Self {
        self.ast.returning = columns;
        self
    }

    pub fn build(self) -> Delete {
        self.ast
    }
}
