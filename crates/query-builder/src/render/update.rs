use crate::{
    ast::update::Update,
    render::{Render, Renderer},
};

impl Render for Update {
    fn render(&self, r: &mut Renderer) {
        // 1. UPDATE table
        r.sql.push_str("UPDATE ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.table));

        // 2. SET col = value, ...
        r.sql.push_str(" SET ");
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql
                .push_str(&r.dialect.quote_identifier(&assignment.column));
            r.sql.push_str(" = ");
            assignment.value.render(r);
        }

        // 3. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        // 4. RETURNING
        if !self.returning.is_empty() {
            r.sql.push_str(" RETURNING ");
            for (i, col) in self.returning.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                col.render(r);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ast::expr::{BinaryOp, BinaryOperator, Expr},
        build::update::UpdateBuilder,
        dialect::Postgres,
        ident,
        render::{Render, Renderer},
        value,
    };

    #[test]
    fn test_render_update_with_where_and_returning() {
        let ast = UpdateBuilder::new("users")
            .set("name", value(Value::String("Bob".to_string())))
            .where_clause(Expr::BinaryOp(Box::new(BinaryOp {
                left: ident("id"),
                op: BinaryOperator::Eq,
                right: value(Value::Int(7)),
            })))
            .returning(vec![Expr::Wildcard])
            .build();

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            r#"UPDATE "users" SET "name" = $1 WHERE ("id" = $2) RETURNING *"#
        );
        assert_eq!(
            params,
            vec![Value::String("Bob".to_string()), Value::Int(7)]
        );
    }
}
