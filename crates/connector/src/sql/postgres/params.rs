use model::core::value::Value;
use sqlx::{
    postgres::{PgArguments, Postgres},
    query::Query,
};

/// Binds one `Value` onto a postgres query. UUID, JSON, and the temporal
/// types all have native encodings.
pub fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::String(v) => query.bind(v.clone()),
        Value::Boolean(v) => query.bind(*v),
        Value::Json(v) => query.bind(v.clone()),
        Value::Uuid(v) => query.bind(*v),
        Value::Bytes(v) => query.bind(v.clone()),
        Value::Date(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
        Value::Null => query.bind(Option::<String>::None),
    }
}

pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[Value],
) -> Query<'q, Postgres, PgArguments> {
    for value in params {
        query = bind_value(query, value);
    }
    query
}
