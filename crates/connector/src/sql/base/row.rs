use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::{
    core::value::Value,
    records::row::{FieldValue, RowData},
};
use sqlx::{
    Column, Row, TypeInfo,
    mysql::{MySqlColumn, MySqlRow},
    postgres::{PgColumn, PgRow},
    sqlite::{SqliteColumn, SqliteRow},
};
use tracing::warn;
use uuid::Uuid;

/// A result row from any of the supported backends, decoded by column
/// type name into plain `Value`s.
pub enum DbRow<'a> {
    Sqlite(&'a SqliteRow),
    Postgres(&'a PgRow),
    MySql(&'a MySqlRow),
}

impl DbRow<'_> {
    pub fn to_row_data(&self, table: &str) -> RowData {
        let field_values = match self {
            DbRow::Sqlite(row) => row
                .columns()
                .iter()
                .map(|column| FieldValue {
                    name: column.name().to_string(),
                    value: decode_sqlite(row, column),
                })
                .collect(),
            DbRow::Postgres(row) => row
                .columns()
                .iter()
                .map(|column| FieldValue {
                    name: column.name().to_string(),
                    value: decode_postgres(row, column),
                })
                .collect(),
            DbRow::MySql(row) => row
                .columns()
                .iter()
                .map(|column| FieldValue {
                    name: column.name().to_string(),
                    value: decode_mysql(row, column),
                })
                .collect(),
        };
        RowData::new(table, field_values)
    }
}

fn decode_sqlite(row: &SqliteRow, column: &SqliteColumn) -> Value {
    let index = column.ordinal();
    let value = match column.type_info().name() {
        "INTEGER" | "INT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int),
        "REAL" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float),
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Boolean),
        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map(Value::Date),
        "DATETIME" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Timestamp),
        "TEXT" => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String),
        "NULL" => None,
        other => {
            warn!("unknown sqlite column type: {other}");
            row.try_get::<Option<String>, _>(index)
                .ok()
                .flatten()
                .map(Value::String)
        }
    };
    value.unwrap_or(Value::Null)
}

fn decode_postgres(row: &PgRow, column: &PgColumn) -> Value {
    let index = column.ordinal();
    let value = match column.type_info().name() {
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::from(v))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(f64::from(v))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float),
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Boolean),
        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes),
        "UUID" => row
            .try_get::<Option<Uuid>, _>(index)
            .ok()
            .flatten()
            .map(Value::Uuid),
        "JSON" | "JSONB" => row
            .try_get::<Option<serde_json::Value>, _>(index)
            .ok()
            .flatten()
            .map(Value::Json),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map(Value::Date),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Timestamp),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map(|naive| Value::Timestamp(DateTime::from_naive_utc_and_offset(naive, Utc))),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String),
        other => {
            warn!("unknown postgres column type: {other}");
            row.try_get::<Option<String>, _>(index)
                .ok()
                .flatten()
                .map(Value::String)
        }
    };
    value.unwrap_or(Value::Null)
}

fn decode_mysql(row: &MySqlRow, column: &MySqlColumn) -> Value {
    let index = column.ordinal();
    let value = match column.type_info().name() {
        "TINYINT" => row
            .try_get::<Option<i8>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::from(v))),
        "SMALLINT" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::from(v))),
        "MEDIUMINT" | "INT" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(i64::from(v))),
        "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64)),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(f64::from(v))),
        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float),
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Boolean),
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes),
        "JSON" => row
            .try_get::<Option<serde_json::Value>, _>(index)
            .ok()
            .flatten()
            .map(Value::Json),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map(Value::Date),
        "TIMESTAMP" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Timestamp),
        "DATETIME" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map(|naive| Value::Timestamp(DateTime::from_naive_utc_and_offset(naive, Utc))),
        "VARCHAR" | "CHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String),
        other => {
            warn!("unknown mysql column type: {other}");
            row.try_get::<Option<String>, _>(index)
                .ok()
                .flatten()
                .map(Value::String)
        }
    };
    value.unwrap_or(Value::Null)
}
