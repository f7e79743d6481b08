//! Storage traits shared by every backend.

use async_trait::async_trait;
use notes_core::types::{DbId, UserId};

use crate::error::StoreError;
use crate::models::note::{NewNote, Note, NoteChanges};
use crate::models::user::User;

/// Note persistence.
///
/// Implementations must make the slug-uniqueness check and the write that
/// depends on it atomic with respect to other writers.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note owned by `author_id`.
    ///
    /// Fails with [`StoreError::DuplicateSlug`] when the slug is taken.
    async fn create(&self, author_id: UserId, input: &NewNote) -> Result<Note, StoreError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError>;

    /// Notes owned by `author_id`, oldest first.
    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Note>, StoreError>;

    /// Whether `slug` is used by any note other than `exclude_id`.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> Result<bool, StoreError>;

    /// Replace title, text and slug. Returns `None` if the note is gone.
    async fn update(&self, id: DbId, changes: &NoteChanges) -> Result<Option<Note>, StoreError>;

    /// Permanently remove a note. Returns `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::DuplicateUsername`] when the name is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Everything the HTTP layer needs from a backend.
#[async_trait]
pub trait Store: NoteStore + UserStore {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;
}
