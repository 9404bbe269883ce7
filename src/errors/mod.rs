//! Domain-specific error types for the toolkit
//!
//! # Error Categories
//!
//! - **EditPageError**: edit page configuration, parameter and lifecycle errors
//! - **RepositoryError**: persistence failures, including integrity violations
//! - **ModelError**: property-path access on a bound entity
//! - **StorageError**: file blob storage
//!
//! # Examples
//!
//! ```rust
//! use toolkit::errors::{EditPageError, RepositoryError};
//!
//! let err = EditPageError::EntityNotFound { page: "group".to_string(), id: 42 };
//! assert!(err.is_not_found());
//!
//! let err = RepositoryError::ConstraintViolation("FOREIGN KEY constraint failed".to_string());
//! assert!(err.is_constraint_violation());
//! ```

pub mod edit_page;
pub mod model;
pub mod repository;
pub mod storage;

pub use edit_page::EditPageError;
pub use model::ModelError;
pub use repository::RepositoryError;
pub use storage::StorageError;

/// Result type alias for edit page operations
pub type EditPageResult<T> = Result<T, EditPageError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for blob storage operations
pub type StorageResult<T> = Result<T, StorageError>;
