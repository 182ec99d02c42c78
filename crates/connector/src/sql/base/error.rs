use model::filter::error::FilterError;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The filter failed to classify or compile; raised before any query
    /// is issued.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Any SQL driver error, propagated unchanged.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// The backend cannot hand rows back from a mutation.
    #[error("{0} does not support RETURNING")]
    UnsupportedReturning(String),

    /// A result set did not have the shape an operation relies on.
    #[error("unexpected result shape: {0}")]
    ResultShape(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// sqlx failed to build the connection pool.
    #[error("connection failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The URL scheme does not name a supported backend.
    #[error("unsupported database URL: {0}")]
    UnsupportedScheme(String),
}
