//! PostgreSQL-backed [`Store`].
//!
//! Uniqueness is enforced by the `uq_notes_slug` and `uq_users_username`
//! constraints, so concurrent writers cannot both claim a value; the
//! resulting unique violations are translated into the matching
//! [`StoreError`] variant.

use async_trait::async_trait;
use notes_core::types::{DbId, UserId};

use crate::error::{StoreError, UQ_NOTES_SLUG, UQ_USERS_USERNAME};
use crate::models::note::{NewNote, Note, NoteChanges};
use crate::models::user::User;
use crate::repositories::{NoteRepo, UserRepo};
use crate::store::{NoteStore, Store, UserStore};
use crate::DbPool;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `constraint` to `on_violation`, anything else
/// to [`StoreError::Database`].
fn map_unique(
    err: sqlx::Error,
    constraint: &str,
    on_violation: impl FnOnce() -> StoreError,
) -> StoreError {
    if StoreError::violated_unique_constraint(&err) == Some(constraint) {
        tracing::debug!(constraint, "Unique constraint violated");
        on_violation()
    } else {
        tracing::error!(error = %err, "Database query failed");
        StoreError::Database(err)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn create(&self, author_id: UserId, input: &NewNote) -> Result<Note, StoreError> {
        NoteRepo::create(&self.pool, author_id, input)
            .await
            .map_err(|e| {
                map_unique(e, UQ_NOTES_SLUG, || {
                    StoreError::DuplicateSlug(input.slug.clone())
                })
            })
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        Ok(NoteRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Note>, StoreError> {
        Ok(NoteRepo::list_by_author(&self.pool, author_id).await?)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> Result<bool, StoreError> {
        Ok(NoteRepo::slug_exists(&self.pool, slug, exclude_id).await?)
    }

    async fn update(&self, id: DbId, changes: &NoteChanges) -> Result<Option<Note>, StoreError> {
        NoteRepo::update(&self.pool, id, changes)
            .await
            .map_err(|e| {
                map_unique(e, UQ_NOTES_SLUG, || {
                    StoreError::DuplicateSlug(changes.slug.clone())
                })
            })
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(NoteRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, username, password_hash)
            .await
            .map_err(|e| {
                map_unique(e, UQ_USERS_USERNAME, || {
                    StoreError::DuplicateUsername(username.to_string())
                })
            })
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
