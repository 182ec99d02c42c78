use model::core::value::Value;
use sqlx::{
    mysql::{MySql, MySqlArguments},
    query::Query,
};

/// Binds one `Value` onto a mysql query. UUIDs are bound as their
/// hyphenated text form.
pub fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::String(v) => query.bind(v.clone()),
        Value::Boolean(v) => query.bind(*v),
        Value::Json(v) => query.bind(v.clone()),
        Value::Uuid(v) => query.bind(v.to_string()),
        Value::Bytes(v) => query.bind(v.clone()),
        Value::Date(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
        Value::Null => query.bind(Option::<String>::None),
    }
}

pub fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &[Value],
) -> Query<'q, MySql, MySqlArguments> {
    for value in params {
        query = bind_value(query, value);
    }
    query
}
