//! Integration tests for the PostgreSQL store.
//!
//! Exercises [`PgStore`] against a real database, so they only run when
//! `DATABASE_URL` points at a server sqlx can create test databases on:
//!
//! ```text
//! cargo test -p notes-db -- --ignored
//! ```

use assert_matches::assert_matches;
use sqlx::PgPool;
use notes_db::models::note::{NewNote, NoteChanges};
use notes_db::models::user::User;
use notes_db::{NoteStore, PgStore, Store, StoreError, UserStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_note(title: &str, slug: &str) -> NewNote {
    NewNote {
        title: title.to_string(),
        text: "Текст".to_string(),
        slug: slug.to_string(),
    }
}

async fn user(store: &PgStore, username: &str) -> User {
    store
        .create_user(username, "hash")
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_and_fetch_note(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = user(&store, "author").await;

    let note = store
        .create(author.id, &new_note("Заметка", "zametka"))
        .await
        .unwrap();

    let fetched = store.get_by_slug("zametka").await.unwrap().unwrap();
    assert_eq!(fetched, note);
    assert_eq!(fetched.author_id, author.id);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_slug_hits_unique_constraint(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = user(&store, "author").await;
    store.create(author.id, &new_note("A", "same")).await.unwrap();

    let result = store.create(author.id, &new_note("B", "same")).await;

    assert_matches!(result, Err(StoreError::DuplicateSlug(ref s)) if s == "same");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_by_author_returns_only_own_notes(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = user(&store, "author").await;
    let other = user(&store, "other").await;
    store.create(author.id, &new_note("A", "a")).await.unwrap();
    store.create(other.id, &new_note("B", "b")).await.unwrap();
    store.create(author.id, &new_note("C", "c")).await.unwrap();

    let slugs: Vec<String> = store
        .list_by_author(author.id)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.slug)
        .collect();
    assert_eq!(slugs, ["a", "c"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn slug_exists_can_exclude_a_note(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = user(&store, "author").await;
    let note = store.create(author.id, &new_note("A", "a")).await.unwrap();

    assert!(store.slug_exists("a", None).await.unwrap());
    assert!(!store.slug_exists("a", Some(note.id)).await.unwrap());
    assert!(!store.slug_exists("missing", None).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_and_delete(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = user(&store, "author").await;
    let note = store.create(author.id, &new_note("A", "a")).await.unwrap();

    let changes = NoteChanges {
        title: "Новая".to_string(),
        text: "Новый текст".to_string(),
        slug: "new".to_string(),
    };
    let updated = store.update(note.id, &changes).await.unwrap().unwrap();
    assert_eq!(updated.slug, "new");
    assert_eq!(updated.title, "Новая");
    assert!(updated.updated_at >= note.updated_at);

    assert!(store.delete(note.id).await.unwrap());
    assert!(!store.delete(note.id).await.unwrap());
    assert!(store.update(note.id, &changes).await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_is_reported(pool: PgPool) {
    let store = PgStore::new(pool);
    user(&store, "author").await;

    let result = store.create_user("author", "hash").await;

    assert_matches!(result, Err(StoreError::DuplicateUsername(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    let store = PgStore::new(pool);
    store.health_check().await.unwrap();
    assert_eq!(store.backend(), "postgres");
}
