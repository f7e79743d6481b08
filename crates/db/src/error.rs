use notes_core::error::CoreError;

/// Unique constraint on `notes.slug`.
pub const UQ_NOTES_SLUG: &str = "uq_notes_slug";

/// Unique constraint on `users.username`.
pub const UQ_USERS_USERNAME: &str = "uq_users_username";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors raised by the note and user stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Slug '{0}' is already used by another note")]
    DuplicateSlug(String),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns the name of the unique constraint `err` violated, if any.
    pub fn violated_unique_constraint(err: &sqlx::Error) -> Option<&str> {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                db_err.constraint()
            }
            _ => None,
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlug(slug) => CoreError::DuplicateSlug(slug),
            StoreError::DuplicateUsername(name) => {
                CoreError::Conflict(format!("A user named '{name}' already exists"))
            }
            StoreError::Database(e) => CoreError::Internal(e.to_string()),
        }
    }
}
