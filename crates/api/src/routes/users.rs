//! Route definitions for the `/auth` pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;
use crate::urls;

/// Account routes under `/auth`.
///
/// ```text
/// GET, POST /auth/login/    -> login_form, login
/// GET, POST /auth/logout/   -> logout
/// GET, POST /auth/signup/   -> signup_form, signup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(urls::LOGIN, get(users::login_form).post(users::login))
        .route(urls::LOGOUT, get(users::logout).post(users::logout))
        .route(urls::SIGNUP, get(users::signup_form).post(users::signup))
}
