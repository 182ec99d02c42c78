use crate::sql::{
    base::{
        adapter::{DatabaseKind, InsertOutcome, SqlAdapter},
        error::{ConnectorError, DbError},
        row::DbRow,
    },
    sqlite::params,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use query_builder::dialect::{Dialect, Sqlite as SqliteDialect};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

#[derive(Clone)]
pub struct SqliteAdapter {
    pool: SqlitePool,
    dialect: SqliteDialect,
}

impl SqliteAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let mut options = SqlitePoolOptions::new();
        if url.contains(":memory:") {
            // A second pooled connection would open a different database.
            options = options.max_connections(1);
        }
        let pool = options.connect(url).await?;
        Ok(SqliteAdapter {
            pool,
            dialect: SqliteDialect,
        })
    }
}

#[async_trait]
impl SqlAdapter for SqliteAdapter {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::Sqlite(row).to_row_data(""))
            .collect())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert(&self, sql: &str, params: &[Value]) -> Result<InsertOutcome, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let result = query.execute(&self.pool).await?;
        let rows_affected = result.rows_affected();
        // Rowids of a single multi-row INSERT are assigned sequentially, and
        // sqlite reports the last one.
        let first = result.last_insert_rowid() - rows_affected.saturating_sub(1) as i64;
        Ok(InsertOutcome {
            rows_affected,
            first_insert_id: Some(first),
        })
    }

    async fn raw(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        // sqlite hands rows straight back; statements without a result set
        // produce an empty list.
        self.fetch(sql, params).await
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}
