/// Suffix appended to a colliding slug in the user-facing validation message.
pub const DUPLICATE_SLUG_WARNING: &str = " - such a slug already exists, choose a unique value!";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing entity, or one the requester is not allowed to see.
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("{0}{DUPLICATE_SLUG_WARNING}")]
    DuplicateSlug(String),

    #[error("Validation failed on '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }

    /// A not-found error for a note looked up by slug.
    pub fn note_not_found(slug: &str) -> Self {
        CoreError::NotFound {
            entity: "Note",
            key: slug.to_string(),
        }
    }
}
