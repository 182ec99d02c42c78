//! Classifies JSON filters into [`FilterExpr`] in a single structural pass.
//!
//! A mapping is either a property filter (plain column keys) or a special
//! filter (exactly one `$`-prefixed operator key). Anything malformed is a
//! typed error; the classifier never coerces a bad filter into "no match".

use crate::{
    core::value::Value,
    filter::{
        error::FilterError,
        expr::{FilterExpr, Range, RawBindings},
    },
};
use serde_json::{Map, Value as Json};

impl FilterExpr {
    pub fn from_json(filter: &Json) -> Result<FilterExpr, FilterError> {
        match filter {
            Json::Null => Ok(FilterExpr::matches_all()),
            Json::Object(map) if map.is_empty() => Ok(FilterExpr::matches_all()),
            Json::Object(map) => {
                if map.keys().any(|key| key.starts_with('$')) {
                    special_filter(map)
                } else {
                    Ok(FilterExpr::Properties(
                        map.iter()
                            .map(|(key, value)| (key.clone(), Value::from_json(value.clone())))
                            .collect(),
                    ))
                }
            }
            _ => Err(FilterError::InvalidOperand {
                operator: "filter",
                expected: "an object",
            }),
        }
    }
}

fn special_filter(map: &Map<String, Json>) -> Result<FilterExpr, FilterError> {
    let (operator, payload) = match map.iter().next() {
        Some(entry) if map.len() == 1 => entry,
        _ => return Err(FilterError::AmbiguousSpecial { found: map.len() }),
    };

    match operator.as_str() {
        "$and" => Ok(FilterExpr::And(filter_list("$and", payload)?)),
        "$or" => Ok(FilterExpr::Or(filter_list("$or", payload)?)),
        "$not" => Ok(FilterExpr::not(FilterExpr::from_json(payload)?)),
        "$in" => {
            let (column, values) = column_list("$in", payload)?;
            Ok(FilterExpr::In { column, values })
        }
        "$notIn" => {
            let (column, values) = column_list("$notIn", payload)?;
            Ok(FilterExpr::NotIn { column, values })
        }
        "$null" => Ok(FilterExpr::Null(column_name("$null", payload)?)),
        "$notNull" => Ok(FilterExpr::NotNull(column_name("$notNull", payload)?)),
        "$between" => {
            let (column, range) = column_range("$between", payload)?;
            Ok(FilterExpr::Between { column, range })
        }
        "$notBetween" => {
            let (column, range) = column_range("$notBetween", payload)?;
            Ok(FilterExpr::NotBetween { column, range })
        }
        "$gt" => {
            let (column, value) = column_scalar("$gt", payload)?;
            Ok(FilterExpr::Gt { column, value })
        }
        "$gte" => {
            let (column, value) = column_scalar("$gte", payload)?;
            Ok(FilterExpr::Gte { column, value })
        }
        "$lt" => {
            let (column, value) = column_scalar("$lt", payload)?;
            Ok(FilterExpr::Lt { column, value })
        }
        "$lte" => {
            let (column, value) = column_scalar("$lte", payload)?;
            Ok(FilterExpr::Lte { column, value })
        }
        "$raw" => raw_filter(payload),
        // Deferred filters carry a future; they only exist programmatically.
        other => Err(FilterError::UnknownOperator(other.to_string())),
    }
}

fn filter_list(operator: &'static str, payload: &Json) -> Result<Vec<FilterExpr>, FilterError> {
    let Json::Array(items) = payload else {
        return Err(FilterError::InvalidOperand {
            operator,
            expected: "a list of filters",
        });
    };
    items.iter().map(FilterExpr::from_json).collect()
}

/// The `column → payload` mappings (`$in`, `$gt`, `$between`, ...) must name
/// exactly one column.
fn single_entry<'a>(
    operator: &'static str,
    payload: &'a Json,
) -> Result<(&'a String, &'a Json), FilterError> {
    let Json::Object(map) = payload else {
        return Err(FilterError::InvalidOperand {
            operator,
            expected: "a single-column mapping",
        });
    };
    match map.iter().next() {
        Some(entry) if map.len() == 1 => Ok(entry),
        _ => Err(FilterError::OperandArity {
            operator,
            found: map.len(),
        }),
    }
}

fn column_list(
    operator: &'static str,
    payload: &Json,
) -> Result<(String, Vec<Value>), FilterError> {
    let (column, list) = single_entry(operator, payload)?;
    let Json::Array(items) = list else {
        return Err(FilterError::InvalidOperand {
            operator,
            expected: "a list of values",
        });
    };
    let values = items.iter().map(|item| Value::from_json(item.clone())).collect();
    Ok((column.clone(), values))
}

fn column_name(operator: &'static str, payload: &Json) -> Result<String, FilterError> {
    let Json::String(column) = payload else {
        return Err(FilterError::InvalidOperand {
            operator,
            expected: "a column name",
        });
    };
    Ok(column.clone())
}

fn column_range(operator: &'static str, payload: &Json) -> Result<(String, Range), FilterError> {
    let (column, bounds) = single_entry(operator, payload)?;
    let (Some(from), Some(to)) = (bounds.get("from"), bounds.get("to")) else {
        return Err(FilterError::InvalidOperand {
            operator,
            expected: "a {from, to} range",
        });
    };
    let range = Range {
        from: Value::from_json(from.clone()),
        to: Value::from_json(to.clone()),
    };
    Ok((column.clone(), range))
}

fn column_scalar(operator: &'static str, payload: &Json) -> Result<(String, Value), FilterError> {
    let (column, value) = single_entry(operator, payload)?;
    Ok((column.clone(), Value::from_json(value.clone())))
}

fn raw_filter(payload: &Json) -> Result<FilterExpr, FilterError> {
    let Some(Json::String(query)) = payload.get("$query") else {
        return Err(FilterError::InvalidOperand {
            operator: "$raw",
            expected: "a {$query, $bindings} object",
        });
    };
    let bindings = match payload.get("$bindings") {
        None | Some(Json::Null) => RawBindings::Positional(Vec::new()),
        Some(Json::Array(items)) => RawBindings::Positional(
            items.iter().map(|item| Value::from_json(item.clone())).collect(),
        ),
        Some(Json::Object(map)) => RawBindings::Named(
            map.iter()
                .map(|(key, value)| (key.clone(), Value::from_json(value.clone())))
                .collect(),
        ),
        Some(_) => {
            return Err(FilterError::InvalidOperand {
                operator: "$raw",
                expected: "list or mapping bindings",
            });
        }
    };
    Ok(FilterExpr::Raw {
        query: query.clone(),
        bindings,
    })
}
