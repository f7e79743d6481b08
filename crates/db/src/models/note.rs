//! Note model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use notes_core::access::Owned;
use notes_core::types::{DbId, Timestamp, UserId};

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Note {
    fn owner_id(&self) -> UserId {
        self.author_id
    }
}

/// DTO for inserting a note. The slug is already assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

/// DTO for replacing the editable fields of a note.
///
/// The author is deliberately absent: ownership never changes.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteChanges {
    pub title: String,
    pub text: String,
    pub slug: String,
}
