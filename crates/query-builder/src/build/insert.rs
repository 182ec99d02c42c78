//! Provides a fluent builder for constructing `Insert` ASTs.

use crate::ast::{expr::Expr, insert::Insert};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Insert {
                table: table.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.ast.columns = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Adds a row of values to the insert statement.
    /// This can be called multiple times for a batch insert.
    pub fn values(mut self, values: Vec<Expr>) -> Self {
        self.ast.values.push(values);
        self
    }

    /// Adds a RETURNING clause.
    pub fn returning(mut self, columns: Vec<Expr>) -> Self {
        self.ast.returning = columns;
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{ast::expr::Expr, build::insert::InsertBuilder, value};

    #[test]
    fn test_build_single_insert() {
        let builder = InsertBuilder::new("users");
        let ast = builder
            .columns(&["name", "email"])
            .values(vec![
                value(Value::String("Alice".to_string())),
                value(Value::String("a@test.com".to_string())),
            ])
            .build();

        assert_eq!(ast.table, "users");
        assert_eq!(ast.columns, vec!["name", "email"]);
        assert_eq!(ast.values.len(), 1);
        assert_eq!(ast.values[0].len(), 2);
    }

    #[test]
    fn test_build_batch_insert_with_returning() {
        let builder = InsertBuilder::new("logs");
        let ast = builder
            .columns(&["level", "message"])
            .values(vec![
                value(Value::String("info".to_string())),
                value(Value::String("started".to_string())),
            ])
            .values(vec![
                value(Value::String("warn".to_string())),
                value(Value::String("deprecated".to_string())),
            ])
            .returning(vec![Expr::Wildcard])
            .build();

        assert_eq!(ast.values.len(), 2);
        assert_eq!(ast.values[1][0], value(Value::String("warn".to_string())));
        assert_eq!(ast.returning, vec![Expr::Wildcard]);
    }
}
