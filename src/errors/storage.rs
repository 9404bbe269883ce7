use sea_orm::DbErr;
use thiserror::Error;

/// File blob storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading the incoming content failed; nothing was written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Blob names must be non-empty
    #[error("Invalid file name: '{0}'")]
    InvalidName(String),
}
