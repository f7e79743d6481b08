//! In-memory store for tests and database-less local runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use notes_core::types::{DbId, UserId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::note::{NewNote, Note, NoteChanges};
use crate::models::user::User;
use crate::store::{NoteStore, Store, UserStore};

#[derive(Debug, Default)]
struct Inner {
    next_note_id: DbId,
    next_user_id: UserId,
    /// Keyed by id, so iteration follows insertion order.
    notes: BTreeMap<DbId, Note>,
    slugs: HashMap<String, DbId>,
    users: BTreeMap<UserId, User>,
    usernames: HashMap<String, UserId>,
}

/// Store backed by process memory.
///
/// All state sits behind one lock; every uniqueness check runs under the
/// same write guard as the mutation it protects.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, author_id: UserId, input: &NewNote) -> Result<Note, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.slugs.contains_key(&input.slug) {
            tracing::debug!(slug = %input.slug, "Slug already taken");
            return Err(StoreError::DuplicateSlug(input.slug.clone()));
        }

        inner.next_note_id += 1;
        let now = Utc::now();
        let note = Note {
            id: inner.next_note_id,
            title: input.title.clone(),
            text: input.text.clone(),
            slug: input.slug.clone(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        inner.slugs.insert(note.slug.clone(), note.id);
        inner.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .slugs
            .get(slug)
            .and_then(|id| inner.notes.get(id))
            .cloned())
    }

    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .notes
            .values()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<DbId>) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(matches!(inner.slugs.get(slug), Some(id) if Some(*id) != exclude_id))
    }

    async fn update(&self, id: DbId, changes: &NoteChanges) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.write().await;
        if matches!(inner.slugs.get(&changes.slug), Some(owner) if *owner != id) {
            tracing::debug!(note_id = id, slug = %changes.slug, "Slug already taken");
            return Err(StoreError::DuplicateSlug(changes.slug.clone()));
        }

        let Some(note) = inner.notes.get_mut(&id) else {
            return Ok(None);
        };
        let old_slug = std::mem::replace(&mut note.slug, changes.slug.clone());
        note.title = changes.title.clone();
        note.text = changes.text.clone();
        note.updated_at = Utc::now();
        let updated = note.clone();

        inner.slugs.remove(&old_slug);
        inner.slugs.insert(updated.slug.clone(), id);
        Ok(Some(updated))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.notes.remove(&id) {
            Some(note) => {
                inner.slugs.remove(&note.slug);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.notes.len() as i64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.usernames.contains_key(username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.usernames.insert(user.username.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .usernames
            .get(username)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
