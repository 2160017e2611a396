use steam_ingest_db::OperationError;
use steam_ingest_store::StoreError;
use thiserror::Error;

/// Errors that abort the ingestion of a single AppID.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Payload is missing required field '{0}'")]
    MissingField(&'static str),
}
