use crate::sql::{
    base::{
        adapter::{DatabaseKind, InsertOutcome, SqlAdapter},
        error::{ConnectorError, DbError},
        row::DbRow,
    },
    postgres::params,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use query_builder::dialect::{Dialect, Postgres as PostgresDialect};
use sqlx::postgres::{PgPool, PgPoolOptions};

#[derive(Clone)]
pub struct PgAdapter {
    pool: PgPool,
    dialect: PostgresDialect,
}

impl PgAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let pool = PgPoolOptions::new().connect(url).await?;
        Ok(PgAdapter {
            pool,
            dialect: PostgresDialect,
        })
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::Postgres(row).to_row_data(""))
            .collect())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert(&self, sql: &str, params: &[Value]) -> Result<InsertOutcome, DbError> {
        // Postgres exposes generated ids through RETURNING, which the
        // executor prefers; a plain INSERT reports the row count only.
        let query = params::bind_all(sqlx::query(sql), params);
        let result = query.execute(&self.pool).await?;
        Ok(InsertOutcome {
            rows_affected: result.rows_affected(),
            first_insert_id: None,
        })
    }

    async fn raw(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        // The driver already unwraps the result envelope into rows.
        self.fetch(sql, params).await
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}
