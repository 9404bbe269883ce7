//! Edit page error types
//!
//! Configuration errors (`MissingRepository`, `MissingListPage`) are raised while a
//! page definition is built and are meant for developers. The remaining variants
//! surface while a request is handled and end up on an error page.

use thiserror::Error;

use super::{ModelError, RepositoryError};

/// Edit page errors
#[derive(Error, Debug)]
pub enum EditPageError {
    /// No repository was configured for the page
    #[error("Edit page '{0}' has no repository configured")]
    MissingRepository(String),

    /// No listing destination was configured for the page
    #[error("Edit page '{0}' has no list page configured")]
    MissingListPage(String),

    /// The requested entity does not exist
    #[error("{page} {id} not found")]
    EntityNotFound {
        /// Page name
        page: String,
        /// Requested identifier
        id: i64,
    },

    /// A request parameter could not be parsed
    #[error("Invalid page parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Raw value received
        value: String,
    },

    /// An action needs a bound model but the page has none
    #[error("Edit page '{0}' has no model bound")]
    NoModel(String),

    /// Repository operation failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Property access on the bound entity failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Select choices could not be loaded
    #[error("Failed to load choices for '{field}': {reason}")]
    Choices {
        /// Field path
        field: String,
        /// Underlying failure
        reason: String,
    },
}

impl EditPageError {
    /// Configuration errors are raised before any page is rendered
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EditPageError::MissingRepository(_) | EditPageError::MissingListPage(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EditPageError::EntityNotFound { .. })
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EditPageError::EntityNotFound { .. } | EditPageError::InvalidParameter { .. }
        )
    }

    /// HTTP status used when the error is rendered as a page
    pub fn http_status_code(&self) -> u16 {
        match self {
            EditPageError::EntityNotFound { .. } => 404,
            EditPageError::InvalidParameter { .. } => 400,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found() {
        let err = EditPageError::EntityNotFound {
            page: "group".to_string(),
            id: 7,
        };
        assert_eq!(err.to_string(), "group 7 not found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_configuration_errors() {
        let err = EditPageError::MissingListPage("person".to_string());
        assert!(err.is_configuration_error());
        assert!(!err.is_client_error());
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_invalid_parameter() {
        let err = EditPageError::InvalidParameter {
            name: "id".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid page parameter 'id': abc");
        assert_eq!(err.http_status_code(), 400);
    }
}
