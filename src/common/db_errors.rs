//! Database error categorization
//!
//! Repositories turn sea-orm errors into [`crate::errors::RepositoryError`]; the
//! categorization here decides which failures are integrity violations (shown to
//! the user) and which are plain database failures.
//!
//! ```
//! use toolkit::common::db_errors::DbErrorKind;
//! use sea_orm::DbErr;
//!
//! let err = DbErr::RecordNotFound("group".to_string());
//! assert_eq!(DbErrorKind::from_db_err(&err), DbErrorKind::NotFound);
//! ```

use sea_orm::{DbErr, SqlErr};

/// Categories of database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Record not found (query returned no results)
    NotFound,

    /// Unique constraint violation
    UniqueViolation,

    /// Foreign key constraint violation, e.g. deleting a referenced row
    ForeignKeyViolation,

    /// Database connection error
    ConnectionError,

    /// Unknown/other database error
    Unknown,
}

impl DbErrorKind {
    /// Categorize a sea_orm database error
    ///
    /// Driver error codes are checked first; the message is inspected as a
    /// fallback for errors raised without a driver code.
    pub fn from_db_err(err: &DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => return Self::UniqueViolation,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Self::ForeignKeyViolation,
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::ConnectionError,
            DbErr::Exec(_) | DbErr::Query(_) => {
                let msg_lower = err.to_string().to_lowercase();
                if msg_lower.contains("unique") || msg_lower.contains("duplicate") {
                    Self::UniqueViolation
                } else if msg_lower.contains("foreign key") || msg_lower.contains("fk_") {
                    Self::ForeignKeyViolation
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    /// Integrity violations are user-facing; everything else is a server error
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation | Self::ForeignKeyViolation)
    }
}

/// Format database error with operation context
///
/// ```
/// use toolkit::common::db_errors::*;
/// use sea_orm::DbErr;
///
/// let err = DbErr::RecordNotFound("person".to_string());
/// let (kind, message) = format_db_error("load person", &err);
///
/// assert_eq!(kind, DbErrorKind::NotFound);
/// assert_eq!(message, "load person: record not found");
/// ```
pub fn format_db_error(operation: &str, err: &DbErr) -> (DbErrorKind, String) {
    let kind = DbErrorKind::from_db_err(err);

    let message = match kind {
        DbErrorKind::NotFound => format!("{}: record not found", operation),
        DbErrorKind::UniqueViolation => format!("{}: duplicate key violation", operation),
        DbErrorKind::ForeignKeyViolation => {
            format!("{}: foreign key constraint violation", operation)
        }
        DbErrorKind::ConnectionError => format!("{}: database connection failed", operation),
        DbErrorKind::Unknown => format!("{}: database error - {}", operation, err),
    };

    (kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    fn exec(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn test_categorize_record_not_found() {
        let err = DbErr::RecordNotFound("Group not found".to_string());
        let kind = DbErrorKind::from_db_err(&err);
        assert_eq!(kind, DbErrorKind::NotFound);
        assert!(!kind.is_integrity_violation());
    }

    #[test]
    fn test_categorize_foreign_key_violation() {
        let kind = DbErrorKind::from_db_err(&exec("FOREIGN KEY constraint failed"));
        assert_eq!(kind, DbErrorKind::ForeignKeyViolation);
        assert!(kind.is_integrity_violation());
    }

    #[test]
    fn test_categorize_unique_violation() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "UNIQUE constraint failed: groups.name".to_string(),
        ));
        assert_eq!(DbErrorKind::from_db_err(&err), DbErrorKind::UniqueViolation);
    }

    #[test]
    fn test_categorize_connection_error() {
        let err = DbErr::Conn(RuntimeErr::Internal("Connection refused".to_string()));
        assert_eq!(DbErrorKind::from_db_err(&err), DbErrorKind::ConnectionError);
    }

    #[test]
    fn test_format_db_error_foreign_key() {
        let (kind, message) = format_db_error("delete group", &exec("FOREIGN KEY constraint failed"));
        assert_eq!(kind, DbErrorKind::ForeignKeyViolation);
        assert_eq!(message, "delete group: foreign key constraint violation");
    }

    #[test]
    fn test_format_db_error_unknown_keeps_details() {
        let (kind, message) = format_db_error("save person", &exec("disk I/O error"));
        assert_eq!(kind, DbErrorKind::Unknown);
        assert!(message.contains("disk I/O error"));
    }
}
