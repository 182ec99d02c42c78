use crate::{
    ast::insert::Insert,
    render::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.table));
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        // 2. VALUES (...)
        r.sql.push_str(" VALUES ");
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push('(');
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    r.sql.push_str(", ");
                }
                // Each value expression is rendered, which for Expr::Value
                // will add a parameter and its placeholder.
                val.render(r);
            }
            r.sql.push(')');
        }

        // 3. RETURNING
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
        ast::{expr::Expr, insert::Insert},
        dialect::{MySql, Postgres},
        render::{Render, Renderer},
        value,
    };

    #[test]
    fn test_render_batch_insert_postgres() {
        let ast = Insert {
            table: "users".to_string(),
            columns: vec!["name".to_string(), "is_active".to_string()],
            values: vec![
                vec![
                    value(Value::String("Alice".to_string())),
                    value(Value::Boolean(true)),
                ],
                vec![
                    value(Value::String("Bob".to_string())),
                    value(Value::Boolean(false)),
                ],
            ],
            returning: vec![Expr::Wildcard],
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql =
            r#"INSERT INTO "users" ("name", "is_active") VALUES ($1, $2), ($3, $4) RETURNING *"#;
        assert_eq!(sql, expected_sql);
        assert_eq!(
            params,
            vec![
                Value::String("Alice".to_string()),
                Value::Boolean(true),
                Value::String("Bob".to_string()),
                Value::Boolean(false)
            ]
        );
    }

    #[test]
    fn test_render_insert_mysql() {
        let ast = Insert {
            table: "logs".to_string(),
            columns: vec!["message".to_string()],
            values: vec![vec![value(Value::String("started".to_string()))]],
            returning: vec![],
        };

        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "INSERT INTO `logs` (`message`) VALUES (?)");
        assert_eq!(params, vec![Value::String("started".to_string())]);
    }
}
