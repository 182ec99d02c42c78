use model::core::value::Value;
use sqlx::{
    query::Query,
    sqlite::{Sqlite, SqliteArguments},
};

/// Binds one `Value` onto a sqlite query. Values without a native sqlite
/// encoding (UUIDs, JSON) are bound as text.
pub fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::String(v) => query.bind(v.clone()),
        Value::Boolean(v) => query.bind(*v),
        Value::Json(v) => query.bind(v.to_string()),
        Value::Uuid(v) => query.bind(v.to_string()),
        Value::Bytes(v) => query.bind(v.clone()),
        Value::Date(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
        Value::Null => query.bind(Option::<String>::None),
    }
}

pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = bind_value(query, value);
    }
    query
}
