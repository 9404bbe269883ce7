use sea_orm::DbErr;
use thiserror::Error;

use crate::common::db_errors::format_db_error;

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The write would break referential or unique integrity
    #[error("Integrity constraint violated: {0}")]
    ConstraintViolation(String),

    /// The entity to update or delete is not persisted
    #[error("Entity is not persisted")]
    NotPersisted,

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl RepositoryError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, RepositoryError::ConstraintViolation(_))
    }
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        let (kind, message) = format_db_error("repository write", &err);
        if kind.is_integrity_violation() {
            RepositoryError::ConstraintViolation(message)
        } else {
            RepositoryError::Database(err)
        }
    }
}
