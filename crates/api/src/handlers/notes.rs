//! Handlers for the note pages.
//!
//! Every handler runs the access policy first, then (for writes) form
//! validation and slug assignment, and only then touches the store.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use notes_core::access::Operation;
use notes_core::error::CoreError;
use notes_core::forms::{validate_note_fields, NOTE_FORM_FIELDS};
use notes_core::slug::{assign_slug, slugify, validate_slug, MAX_SLUG_LENGTH};
use notes_core::types::DbId;
use notes_db::models::note::{NewNote, Note, NoteChanges};
use serde::{Deserialize, Serialize};

use super::FormContext;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::response::{found, DataResponse};
use crate::state::AppState;
use crate::urls;

// ---------------------------------------------------------------------------
// Forms and page contexts
// ---------------------------------------------------------------------------

/// Body of the add and edit forms.
#[derive(Debug, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    fn explicit_slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Unwrap the submitted form. Called only after the access check, so an
/// anonymous request is redirected to login whatever its body looks like.
fn submitted(form: Result<Form<NoteForm>, FormRejection>) -> AppResult<NoteForm> {
    form.map(|Form(form)| form)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn note_form_context(note: Option<&Note>) -> FormContext {
    let form = FormContext::new("NoteForm", NOTE_FORM_FIELDS);
    match note {
        Some(note) => form
            .with_initial("title", &note.title)
            .with_initial("text", &note.text)
            .with_initial("slug", &note.slug),
        None => form,
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListPage {
    pub note_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NoteFormPage {
    pub form: FormContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the note behind `slug` and check the requester owns it.
async fn owned_note(
    state: &AppState,
    current: &CurrentUser,
    operation: Operation,
    slug: &str,
) -> AppResult<Note> {
    let note = state.store.get_by_slug(slug).await?;
    current.require_owner(operation, note, slug)
}

/// Validate the form and pick the slug the note will be saved under.
///
/// Title and text are trimmed once; the trimmed values are both checked and
/// stored. `exclude_id` is the note being edited, so it may keep its own slug.
async fn clean_note_form(
    state: &AppState,
    form: &NoteForm,
    exclude_id: Option<DbId>,
) -> AppResult<(String, String, String)> {
    let title = form.title.trim();
    let text = form.text.trim();
    validate_note_fields(title, text)?;
    let explicit = form.explicit_slug();
    if let Some(slug) = explicit {
        validate_slug(slug)?;
    }

    let candidate = match explicit {
        Some(slug) => slug.to_string(),
        None => slugify(title).chars().take(MAX_SLUG_LENGTH).collect(),
    };

    let taken_slugs: Vec<&str> = if state.store.slug_exists(&candidate, exclude_id).await? {
        vec![candidate.as_str()]
    } else {
        Vec::new()
    };
    let slug =
        assign_slug(title, explicit, taken_slugs.as_slice()).map_err(CoreError::from)?;

    Ok((title.to_string(), text.to_string(), slug))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /notes/
///
/// The requester's own notes, oldest first.
pub async fn list_notes(
    current: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user_id = current.require_user(Operation::List)?;
    let note_list = state.store.list_by_author(user_id).await?;
    Ok(Json(DataResponse {
        data: NoteListPage { note_list },
    }))
}

/// GET /add/
pub async fn add_note_form(current: CurrentUser) -> AppResult<impl IntoResponse> {
    current.require_user(Operation::Create)?;
    Ok(Json(DataResponse {
        data: NoteFormPage {
            form: note_form_context(None),
            note: None,
        },
    }))
}

/// POST /add/
///
/// Create a note owned by the requester, then redirect to the success page.
pub async fn create_note(
    current: CurrentUser,
    State(state): State<AppState>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    let user_id = current.require_user(Operation::Create)?;
    let form = submitted(form)?;
    let (title, text, slug) = clean_note_form(&state, &form, None).await?;

    let note = state
        .store
        .create(user_id, &NewNote { title, text, slug })
        .await?;

    tracing::info!(user_id, note_id = note.id, slug = %note.slug, "Note created");

    Ok(found(urls::NOTE_SUCCESS))
}

/// GET /note/{slug}/
pub async fn get_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let note = owned_note(&state, &current, Operation::View, &slug).await?;
    Ok(Json(DataResponse {
        data: NotePage { note },
    }))
}

/// GET /edit/{slug}/
pub async fn edit_note_form(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let note = owned_note(&state, &current, Operation::Edit, &slug).await?;
    Ok(Json(DataResponse {
        data: NoteFormPage {
            form: note_form_context(Some(&note)),
            note: Some(note),
        },
    }))
}

/// POST /edit/{slug}/
///
/// Replace title, text and slug of the requester's note.
pub async fn update_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    let note = owned_note(&state, &current, Operation::Edit, &slug).await?;
    let form = submitted(form)?;
    let (title, text, new_slug) = clean_note_form(&state, &form, Some(note.id)).await?;

    let updated = state
        .store
        .update(
            note.id,
            &NoteChanges {
                title,
                text,
                slug: new_slug,
            },
        )
        .await?
        .ok_or_else(|| CoreError::note_not_found(&slug))?;

    tracing::info!(
        user_id = note.author_id,
        note_id = updated.id,
        old_slug = %slug,
        slug = %updated.slug,
        "Note updated"
    );

    Ok(found(urls::NOTE_SUCCESS))
}

/// GET /delete/{slug}/
///
/// Confirmation page.
pub async fn delete_note_form(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let note = owned_note(&state, &current, Operation::Delete, &slug).await?;
    Ok(Json(DataResponse {
        data: NotePage { note },
    }))
}

/// POST /delete/{slug}/ and DELETE /delete/{slug}/
///
/// Permanently remove the requester's note.
pub async fn delete_note(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let note = owned_note(&state, &current, Operation::Delete, &slug).await?;

    if !state.store.delete(note.id).await? {
        return Err(CoreError::note_not_found(&slug).into());
    }

    tracing::info!(
        user_id = note.author_id,
        note_id = note.id,
        slug = %slug,
        "Note deleted"
    );

    Ok(found(urls::NOTE_SUCCESS))
}
