pub mod health;
pub mod notes;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the page route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                        home (public)
/// /notes/                  list (login)
/// /add/                    add form, create (login)
/// /done/                   success (login)
/// /note/{slug}/            detail (owner)
/// /edit/{slug}/            edit form, update (owner)
/// /delete/{slug}/          confirm, delete (owner)
///
/// /auth/login/             login form, login (public)
/// /auth/logout/            logout (public)
/// /auth/signup/            signup form, signup (public)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(notes::router())
        .merge(users::router())
}
