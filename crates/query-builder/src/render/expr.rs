use crate::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident},
    render::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::Wildcard => r.sql.push('*'),
            Expr::BinaryOp(op) => op.render(r),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Not(inner) => {
                r.sql.push_str("NOT (");
                inner.render(r);
                r.sql.push(')');
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                // `IN ()` is not valid SQL; an empty list degenerates to a
                // constant predicate.
                if list.is_empty() {
                    r.sql.push_str(if *negated { "1 = 1" } else { "1 = 0" });
                    return;
                }
                expr.render(r);
                r.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    item.render(r);
                }
                r.sql.push(')');
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                r.sql.push('(');
                expr.render(r);
                r.sql
                    .push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.render(r);
                r.sql.push_str(" AND ");
                high.render(r);
                r.sql.push(')');
            }
            Expr::IsNull { expr, negated } => {
                expr.render(r);
                r.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Expr::Raw { sql, bindings } => {
                r.sql.push('(');
                let mut bindings = bindings.iter();
                let mut in_string = false;
                for ch in sql.chars() {
                    match ch {
                        '\'' => {
                            in_string = !in_string;
                            r.sql.push(ch);
                        }
                        '?' if !in_string => match bindings.next() {
                            Some(value) => r.add_param(value.clone()),
                            None => r.sql.push(ch),
                        },
                        _ => r.sql.push(ch),
                    }
                }
                r.sql.push(')');
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::Lt => " < ",
            BinaryOperator::LtEq => " <= ",
            BinaryOperator::Gt => " > ",
            BinaryOperator::GtEq => " >= ",
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                arg.render(r);
            }
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ast::expr::Expr,
        dialect::{MySql, Postgres},
        ident,
        render::{Render, Renderer},
        value,
    };

    fn render_pg(expr: &Expr) -> (String, Vec<Value>) {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        renderer.finish()
    }

    #[test]
    fn test_render_in_list() {
        let expr = Expr::InList {
            expr: Box::new(ident("id")),
            list: vec![value(Value::Int(1)), value(Value::Int(2))],
            negated: false,
        };
        let (sql, params) = render_pg(&expr);
        assert_eq!(sql, r#""id" IN ($1, $2)"#);
        assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_render_empty_in_list_is_constant() {
        let never = Expr::InList {
            expr: Box::new(ident("id")),
            list: vec![],
            negated: false,
        };
        assert_eq!(render_pg(&never).0, "1 = 0");

        let always = Expr::InList {
            expr: Box::new(ident("id")),
            list: vec![],
            negated: true,
        };
        assert_eq!(render_pg(&always).0, "1 = 1");
    }

    #[test]
    fn test_render_between() {
        let expr = Expr::Between {
            expr: Box::new(ident("age")),
            low: Box::new(value(Value::Int(20))),
            high: Box::new(value(Value::Int(30))),
            negated: true,
        };
        let (sql, params) = render_pg(&expr);
        assert_eq!(sql, r#"("age" NOT BETWEEN $1 AND $2)"#);
        assert_eq!(params, vec![Value::Int(20), Value::Int(30)]);
    }

    #[test]
    fn test_render_is_null_and_not() {
        let expr = Expr::Not(Box::new(Expr::IsNull {
            expr: Box::new(ident("name")),
            negated: false,
        }));
        let (sql, params) = render_pg(&expr);
        assert_eq!(sql, r#"NOT ("name" IS NULL)"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_render_raw_substitutes_placeholders() {
        let expr = Expr::Raw {
            sql: "lower(name) = ? AND note <> '?'".to_string(),
            bindings: vec![Value::String("foo".to_string())],
        };
        let (sql, params) = render_pg(&expr);
        // The '?' inside the string literal is left alone.
        assert_eq!(sql, "(lower(name) = $1 AND note <> '?')");
        assert_eq!(params, vec![Value::String("foo".to_string())]);
    }

    #[test]
    fn test_render_raw_mysql_placeholders() {
        let expr = Expr::Raw {
            sql: "age > ?".to_string(),
            bindings: vec![Value::Int(21)],
        };
        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        let (sql, params) = renderer.finish();
        assert_eq!(sql, "(age > ?)");
        assert_eq!(params, vec![Value::Int(21)]);
    }
}
