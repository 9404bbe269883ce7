use thiserror::Error;

/// Property-path access errors on a bound entity
#[derive(Error, Debug)]
pub enum ModelError {
    /// The path does not name a property of the entity
    #[error("Property '{0}' not found")]
    PropertyNotFound(String),

    /// The value could not be written back into the entity
    #[error("Cannot assign property '{path}': {reason}")]
    Conversion {
        /// Property path
        path: String,
        /// Serde failure message
        reason: String,
    },

    /// The entity does not serialize to an object
    #[error("Entity is not a structured object")]
    NotAnObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
