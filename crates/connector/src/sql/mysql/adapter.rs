use crate::sql::{
    base::{
        adapter::{DatabaseKind, InsertOutcome, SqlAdapter},
        error::{ConnectorError, DbError},
        row::DbRow,
    },
    mysql::params,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use query_builder::dialect::{Dialect, MySql as MySqlDialect};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: MySqlPool,
    dialect: MySqlDialect,
}

impl MySqlAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let pool = MySqlPoolOptions::new().connect(url).await?;
        Ok(MySqlAdapter {
            pool,
            dialect: MySqlDialect,
        })
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        let query = params::bind_all(sqlx::query(sql), params);
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::MySql(row).to_row_data(""))
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
        // LAST_INSERT_ID() reports the first id of a multi-row insert; the
        // rest follow sequentially.
        let first = i64::try_from(result.last_insert_id()).ok().filter(|id| *id > 0);
        Ok(InsertOutcome {
            rows_affected: result.rows_affected(),
            first_insert_id: first,
        })
    }

    async fn raw(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        // MySQL interleaves row-returning and count-only results; only the
        // first result set survives, normalized into plain rows.
        self.fetch(sql, params).await
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }
}
