//! Provides a fluent builder for constructing `Update` ASTs.

use crate::ast::{
    expr::Expr,
    update::{Assignment, Update},
};

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    ast: Update,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Update {
                table: table.to_string(),
                ..Default::default()
            },
        }
    }

    /// Adds one SET clause. Call order is preserved.
    pub fn set(mut self, column: &str, value: Expr) -> Self {
        self.ast.assignments.push(Assignment {
            column: column.to_string(),
            value,
        });
        self
    }

    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(condition);
        self
    }

    pub fn returning(mut self, columns: Vec<Expr>) -> Self {
        self.ast.returning = columns;
        self
    }

    pub fn build(self) -> Update {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{build::update::UpdateBuilder, value};

    #[test]
    fn test_build_update_keeps_assignment_order() {
        let ast = UpdateBuilder::new("users")
            .set("name", value(Value::String("Bob".to_string())))
            .set("age", value(Value::Int(30)))
            .build();

        assert_eq!(ast.table, "users");
        assert_eq!(ast.assignments.len(), 2);
        assert_eq!(ast.assignments[0].column, "name");
        assert_eq!(ast.assignments[1].column, "age");
        assert!(ast.where_clause.is_none());
    }
}
