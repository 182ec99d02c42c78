//! Compiles filter expressions into query-builder predicates.
//!
//! Compilation is pure accumulation: every call takes an expression and
//! returns the predicate tree for it, with no builder state mutated along
//! the way. `None` means the filter matches every row and no WHERE clause
//! should be emitted.

use futures::future::BoxFuture;
use model::{
    core::value::Value,
    filter::{
        error::FilterError,
        expr::{FilterExpr, Range, RawBindings},
    },
};
use query_builder::{
    ast::expr::{BinaryOp, BinaryOperator, Expr},
    ident, value,
};

/// Ceiling for `And`/`Or`/`Not`/deferred recursion, so adversarial nesting
/// fails with a typed error instead of exhausting the stack.
pub const MAX_FILTER_DEPTH: usize = 64;

pub async fn compile(filter: FilterExpr) -> Result<Option<Expr>, FilterError> {
    compile_at(filter, 0).await
}

// Boxed because async recursion needs an indirection, and because deferred
// sub-filters make the whole walk asynchronous.
fn compile_at(
    filter: FilterExpr,
    depth: usize,
) -> BoxFuture<'static, Result<Option<Expr>, FilterError>> {
    Box::pin(async move {
        if depth > MAX_FILTER_DEPTH {
            return Err(FilterError::DepthExceeded {
                max: MAX_FILTER_DEPTH,
            });
        }
        match filter {
            FilterExpr::Properties(pairs) => Ok(property_filter(pairs)),
            FilterExpr::And(filters) => combine(filters, BinaryOperator::And, depth).await,
            FilterExpr::Or(filters) => combine(filters, BinaryOperator::Or, depth).await,
            FilterExpr::Not(inner) => Ok(compile_at(*inner, depth + 1)
                .await?
                .map(|predicate| Expr::Not(Box::new(predicate)))),
            FilterExpr::In { column, values } => Ok(Some(in_list(&column, values, false))),
            FilterExpr::NotIn { column, values } => Ok(Some(in_list(&column, values, true))),
            FilterExpr::Null(column) => Ok(Some(is_null(&column, false))),
            FilterExpr::NotNull(column) => Ok(Some(is_null(&column, true))),
            FilterExpr::Between { column, range } => Ok(Some(between(&column, range, false))),
            FilterExpr::NotBetween { column, range } => Ok(Some(between(&column, range, true))),
            FilterExpr::Gt { column, value } => {
                Ok(Some(comparison(&column, BinaryOperator::Gt, value)))
            }
            FilterExpr::Gte { column, value } => {
                Ok(Some(comparison(&column, BinaryOperator::GtEq, value)))
            }
            FilterExpr::Lt { column, value } => {
                Ok(Some(comparison(&column, BinaryOperator::Lt, value)))
            }
            FilterExpr::Lte { column, value } => {
                Ok(Some(comparison(&column, BinaryOperator::LtEq, value)))
            }
            FilterExpr::Raw { query, bindings } => raw(query, bindings).map(Some),
            FilterExpr::Deferred(deferred) => {
                compile_at(deferred.resolve().await?, depth + 1).await
            }
        }
    })
}

/// Conjunction of implicit equality over the pairs. Equality against NULL
/// never matches in SQL, so a null value compiles to IS NULL instead.
fn property_filter(pairs: Vec<(String, Value)>) -> Option<Expr> {
    let mut predicate: Option<Expr> = None;
    for (column, val) in pairs {
        let clause = if val.is_null() {
            is_null(&column, false)
        } else {
            comparison(&column, BinaryOperator::Eq, val)
        };
        predicate = Some(conjoin(predicate, BinaryOperator::And, clause));
    }
    predicate
}

/// Folds sub-filters into one grouped chain. Sub-filters that match
/// everything contribute no clause; an empty list matches all rows, for
/// `Or` as much as for `And`.
async fn combine(
    filters: Vec<FilterExpr>,
    op: BinaryOperator,
    depth: usize,
) -> Result<Option<Expr>, FilterError> {
    let mut predicate: Option<Expr> = None;
    for filter in filters {
        let Some(clause) = compile_at(filter, depth + 1).await? else {
            continue;
        };
        predicate = Some(conjoin(predicate, op, clause));
    }
    Ok(predicate)
}

fn conjoin(predicate: Option<Expr>, op: BinaryOperator, clause: Expr) -> Expr {
    match predicate {
        Some(left) => Expr::BinaryOp(Box::new(BinaryOp {
            left,
            op,
            right: clause,
        })),
        None => clause,
    }
}

fn comparison(column: &str, op: BinaryOperator, val: Value) -> Expr {
    Expr::BinaryOp(Box::new(BinaryOp {
        left: ident(column),
        op,
        right: value(val),
    }))
}

fn in_list(column: &str, values: Vec<Value>, negated: bool) -> Expr {
    Expr::InList {
        expr: Box::new(ident(column)),
        list: values.into_iter().map(value).collect(),
        negated,
    }
}

fn is_null(column: &str, negated: bool) -> Expr {
    Expr::IsNull {
        expr: Box::new(ident(column)),
        negated,
    }
}

fn between(column: &str, range: Range, negated: bool) -> Expr {
    Expr::Between {
        expr: Box::new(ident(column)),
        low: Box::new(value(range.from)),
        high: Box::new(value(range.to)),
        negated,
    }
}

/// Raw fragments reach the builder with purely positional bindings: named
/// placeholders are rewritten to `?` here, and NULL bindings are replaced
/// with `false` before substitution.
fn raw(query: String, bindings: RawBindings) -> Result<Expr, FilterError> {
    match bindings {
        RawBindings::Positional(values) => {
            let placeholders = count_positional(&query);
            if placeholders != values.len() {
                return Err(FilterError::RawArity {
                    placeholders,
                    bindings: values.len(),
                });
            }
            Ok(Expr::Raw {
                sql: query,
                bindings: values.into_iter().map(squash_null).collect(),
            })
        }
        RawBindings::Named(pairs) => {
            let (sql, values) = resolve_named(&query, &pairs)?;
            Ok(Expr::Raw {
                sql,
                bindings: values,
            })
        }
    }
}

fn squash_null(value: Value) -> Value {
    if value.is_null() {
        Value::Boolean(false)
    } else {
        value
    }
}

fn count_positional(query: &str) -> usize {
    let mut count = 0;
    let mut in_string = false;
    for ch in query.chars() {
        match ch {
            '\'' => in_string = !in_string,
            '?' if !in_string => count += 1,
            _ => {}
        }
    }
    count
}

/// Rewrites `:name` placeholders to `?` and lines the bound values up in
/// occurrence order. `::` is left alone so casts survive.
fn resolve_named(
    query: &str,
    pairs: &[(String, Value)],
) -> Result<(String, Vec<Value>), FilterError> {
    let mut sql = String::with_capacity(query.len());
    let mut values = Vec::new();
    let mut in_string = false;
    let mut chars = query.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_string = !in_string;
                sql.push(ch);
            }
            ':' if !in_string => {
                if chars.peek() == Some(&':') {
                    sql.push(':');
                    sql.push(':');
                    chars.next();
                    continue;
                }
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    sql.push(':');
                    continue;
                }
                let bound = pairs
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.clone())
                    .ok_or(FilterError::MissingBinding(name))?;
                values.push(squash_null(bound));
                sql.push('?');
            }
            _ => sql.push(ch),
        }
    }

    Ok((sql, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::filter::expr::DeferredFilter;
    use query_builder::{
        dialect::Postgres,
        render::{Render, Renderer},
    };

    fn block_on<T>(future: impl std::future::Future<Output = T>) -> T {
        futures::executor::block_on(future)
    }

    fn render(expr: &Expr) -> (String, Vec<Value>) {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        renderer.finish()
    }

    fn compiled(filter: FilterExpr) -> Option<Expr> {
        block_on(compile(filter)).expect("filter should compile")
    }

    #[test]
    fn test_property_filter_conjoins_pairs() {
        let expr = compiled(FilterExpr::Properties(vec![
            ("name".to_string(), Value::String("foo".to_string())),
            ("age".to_string(), Value::Int(18)),
        ]))
        .unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, r#"(("name" = $1) AND ("age" = $2))"#);
        assert_eq!(
            params,
            vec![Value::String("foo".to_string()), Value::Int(18)]
        );
    }

    #[test]
    fn test_property_filter_null_becomes_is_null() {
        let expr = compiled(FilterExpr::property("name", Value::Null)).unwrap();
        assert_eq!(render(&expr).0, r#""name" IS NULL"#);
    }

    #[test]
    fn test_empty_combinators_match_all() {
        assert!(compiled(FilterExpr::And(vec![])).is_none());
        // An empty $or matches all rows, not none.
        assert!(compiled(FilterExpr::Or(vec![])).is_none());
        assert!(compiled(FilterExpr::not(FilterExpr::matches_all())).is_none());
    }

    #[test]
    fn test_and_groups_sub_filters() {
        let expr = compiled(FilterExpr::And(vec![
            FilterExpr::property("id", Value::Int(1)),
            FilterExpr::matches_all(),
            FilterExpr::property("id", Value::Int(1)),
        ]))
        .unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, r#"(("id" = $1) AND ("id" = $2))"#);
        assert_eq!(params, vec![Value::Int(1), Value::Int(1)]);
    }

    #[test]
    fn test_or_chain() {
        let expr = compiled(FilterExpr::Or(vec![
            FilterExpr::property("id", Value::Int(1)),
            FilterExpr::property("id", Value::Int(2)),
            FilterExpr::property("id", Value::Int(3)),
        ]))
        .unwrap();
        let (sql, _) = render(&expr);
        assert_eq!(sql, r#"((("id" = $1) OR ("id" = $2)) OR ("id" = $3))"#);
    }

    #[test]
    fn test_double_negation_structure() {
        let expr = compiled(FilterExpr::not(FilterExpr::not(FilterExpr::property(
            "id",
            Value::Int(1),
        ))))
        .unwrap();
        assert_eq!(render(&expr).0, r#"NOT (NOT (("id" = $1)))"#);
    }

    #[test]
    fn test_comparisons_compile_to_binary_ops() {
        let gte = compiled(FilterExpr::Gte {
            column: "age".to_string(),
            value: Value::Int(21),
        })
        .unwrap();
        assert_eq!(
            gte,
            Expr::BinaryOp(Box::new(BinaryOp {
                left: query_builder::ident!("age"),
                op: BinaryOperator::GtEq,
                right: query_builder::value!(Value::Int(21)),
            }))
        );

        let lt = compiled(FilterExpr::Lt {
            column: "age".to_string(),
            value: Value::Int(21),
        })
        .unwrap();
        assert_eq!(render(&lt).0, r#"("age" < $1)"#);
    }

    #[test]
    fn test_in_and_between() {
        let within = compiled(FilterExpr::In {
            column: "id".to_string(),
            values: vec![Value::Int(1), Value::Int(3)],
        })
        .unwrap();
        assert_eq!(render(&within).0, r#""id" IN ($1, $2)"#);

        let outside = compiled(FilterExpr::NotBetween {
            column: "age".to_string(),
            range: Range {
                from: Value::Int(20),
                to: Value::Int(30),
            },
        })
        .unwrap();
        assert_eq!(render(&outside).0, r#"("age" NOT BETWEEN $1 AND $2)"#);
    }

    #[test]
    fn test_raw_null_bindings_become_false() {
        let expr = compiled(FilterExpr::Raw {
            query: "flag = ?".to_string(),
            bindings: RawBindings::Positional(vec![Value::Null]),
        })
        .unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, "(flag = $1)");
        assert_eq!(params, vec![Value::Boolean(false)]);
    }

    #[test]
    fn test_raw_binding_arity_checked() {
        let error = block_on(compile(FilterExpr::Raw {
            query: "a = ? AND b = ?".to_string(),
            bindings: RawBindings::Positional(vec![Value::Int(1)]),
        }))
        .unwrap_err();
        assert_eq!(
            error,
            FilterError::RawArity {
                placeholders: 2,
                bindings: 1
            }
        );
    }

    #[test]
    fn test_raw_named_bindings_resolve_in_occurrence_order() {
        let expr = compiled(FilterExpr::Raw {
            query: "age > :min AND age < :max".to_string(),
            bindings: RawBindings::Named(vec![
                ("max".to_string(), Value::Int(30)),
                ("min".to_string(), Value::Int(20)),
            ]),
        })
        .unwrap();
        let (sql, params) = render(&expr);
        assert_eq!(sql, "(age > $1 AND age < $2)");
        assert_eq!(params, vec![Value::Int(20), Value::Int(30)]);
    }

    #[test]
    fn test_raw_named_missing_binding() {
        let error = block_on(compile(FilterExpr::Raw {
            query: "age > :min".to_string(),
            bindings: RawBindings::Named(vec![]),
        }))
        .unwrap_err();
        assert_eq!(error, FilterError::MissingBinding("min".to_string()));
    }

    #[test]
    fn test_raw_leaves_casts_alone() {
        let expr = compiled(FilterExpr::Raw {
            query: "payload::text = :want".to_string(),
            bindings: RawBindings::Named(vec![(
                "want".to_string(),
                Value::String("x".to_string()),
            )]),
        })
        .unwrap();
        assert_eq!(render(&expr).0, "(payload::text = $1)");
    }

    #[test]
    fn test_deferred_filter_resolves_before_compiling() {
        let filter = FilterExpr::deferred(async {
            Ok(FilterExpr::property("id", Value::Int(1)))
        });
        let expr = compiled(filter).unwrap();
        assert_eq!(render(&expr).0, r#"("id" = $1)"#);
    }

    #[test]
    fn test_rejected_deferred_surfaces_as_compile_error() {
        let filter = FilterExpr::Deferred(DeferredFilter::new(async {
            Err(FilterError::Deferred("backend offline".to_string()))
        }));
        let error = block_on(compile(filter)).unwrap_err();
        assert_eq!(error, FilterError::Deferred("backend offline".to_string()));
    }

    #[test]
    fn test_depth_ceiling() {
        let mut filter = FilterExpr::property("id", Value::Int(1));
        for _ in 0..(MAX_FILTER_DEPTH + 1) {
            filter = FilterExpr::not(filter);
        }
        let error = block_on(compile(filter)).unwrap_err();
        assert_eq!(
            error,
            FilterError::DepthExceeded {
                max: MAX_FILTER_DEPTH
            }
        );
    }

    #[test]
    fn test_nesting_within_ceiling_compiles() {
        let mut filter = FilterExpr::property("id", Value::Int(1));
        for _ in 0..MAX_FILTER_DEPTH {
            filter = FilterExpr::And(vec![filter]);
        }
        assert!(compiled(filter).is_some());
    }
}
