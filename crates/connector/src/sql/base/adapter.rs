use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use query_builder::dialect::Dialect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
    MySql,
}

/// What an INSERT reported back on a backend that cannot return rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    pub rows_affected: u64,
    /// First generated identifier of the batch, when the backend exposes one.
    pub first_insert_id: Option<i64>,
}

/// One database backend. An adapter is picked once, at construction; the
/// executor never re-branches on the backend per call.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Runs a row-returning statement.
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError>;

    /// Runs a statement and reports the number of affected rows.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DbError>;

    /// Runs an INSERT without a RETURNING clause and reports what the
    /// backend exposes about the generated identifiers.
    async fn insert(&self, sql: &str, params: &[Value]) -> Result<InsertOutcome, DbError>;

    /// Raw SQL passthrough. Result shapes differ per backend; each adapter
    /// normalizes its own into plain rows here.
    async fn raw(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError>;

    fn dialect(&self) -> &dyn Dialect;
    fn kind(&self) -> DatabaseKind;
}
