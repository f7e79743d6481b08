//! Route definitions for the note pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::{notes, pages};
use crate::state::AppState;
use crate::urls;

/// Note routes, mounted at the root.
///
/// ```text
/// GET         /                 -> home
/// GET         /notes/           -> list_notes
/// GET, POST   /add/             -> add_note_form, create_note
/// GET         /done/            -> success
/// GET         /note/{slug}/     -> get_note
/// GET, POST   /edit/{slug}/     -> edit_note_form, update_note
/// GET         /delete/{slug}/   -> delete_note_form
/// POST, DEL   /delete/{slug}/   -> delete_note
/// ```
pub fn router() -> Router<AppState> {
    // Path pattern with the `{slug}` capture.
    let slug = "{slug}";

    Router::new()
        .route(urls::HOME, get(pages::home))
        .route(urls::NOTE_LIST, get(notes::list_notes))
        .route(
            urls::NOTE_ADD,
            get(notes::add_note_form).post(notes::create_note),
        )
        .route(urls::NOTE_SUCCESS, get(pages::success))
        .route(&urls::note_detail(slug), get(notes::get_note))
        .route(
            &urls::note_edit(slug),
            get(notes::edit_note_form).post(notes::update_note),
        )
        .route(
            &urls::note_delete(slug),
            get(notes::delete_note_form)
                .post(notes::delete_note)
                .delete(notes::delete_note),
        )
}
