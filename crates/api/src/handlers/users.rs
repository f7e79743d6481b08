//! Handlers for the account pages (login, logout, signup).

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use notes_core::access::Operation;
use notes_core::error::CoreError;
use notes_core::forms::{
    validate_new_password, validate_username, LOGIN_FORM_FIELDS, SIGNUP_FORM_FIELDS,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::{FormContext, FormPage, StaticPage};
use crate::auth::password::{hash_password_async, verify_password_async};
use crate::auth::session::{end_session, start_session};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::response::{found, DataResponse};
use crate::state::AppState;
use crate::urls;

const INVALID_CREDENTIALS: &str = "Please enter a correct username and password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// `?next=` on the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Body of `POST /auth/login/`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Hidden field; takes precedence over the query string.
    #[serde(default)]
    pub next: Option<String>,
}

/// Body of `POST /auth/signup/`.
#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// GET /auth/login/
pub async fn login_form(
    current: CurrentUser,
    Query(query): Query<NextQuery>,
) -> AppResult<impl IntoResponse> {
    current.permit(Operation::Login)?;
    let mut form = FormContext::new("AuthenticationForm", LOGIN_FORM_FIELDS);
    if let Some(next) = urls::safe_next(query.next.as_deref()) {
        form = form.with_initial("next", next);
    }
    Ok(Json(DataResponse {
        data: FormPage { form },
    }))
}

/// POST /auth/login/
///
/// Check the credentials, start a session and redirect to `next` when it is
/// a local path, otherwise to the home page.
pub async fn login(
    current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    session: Session,
    Form(input): Form<LoginForm>,
) -> AppResult<Response> {
    current.permit(Operation::Login)?;

    let invalid = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let user = state
        .store
        .find_user_by_username(input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password_async(input.password, user.password_hash.clone()).await? {
        tracing::info!(username = %user.username, "Failed login attempt");
        return Err(invalid());
    }

    start_session(&session, user.id).await?;

    let next = input.next.as_deref().or(query.next.as_deref());
    let location = urls::safe_next(next).unwrap_or(urls::HOME).to_string();

    tracing::info!(user_id = user.id, %location, "User logged in");

    Ok(found(location))
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// GET or POST /auth/logout/
///
/// End the session and render the logged-out page.
pub async fn logout(current: CurrentUser, session: Session) -> AppResult<impl IntoResponse> {
    current.permit(Operation::Logout)?;
    end_session(&session).await?;
    if let Some(user_id) = current.user_id() {
        tracing::info!(user_id, "User logged out");
    }
    Ok(Json(DataResponse {
        data: StaticPage {
            page: "logout",
            user: None,
        },
    }))
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// GET /auth/signup/
pub async fn signup_form(current: CurrentUser) -> AppResult<impl IntoResponse> {
    current.permit(Operation::Signup)?;
    Ok(Json(DataResponse {
        data: FormPage {
            form: FormContext::new("UserCreationForm", SIGNUP_FORM_FIELDS),
        },
    }))
}

/// POST /auth/signup/
///
/// Register an account and send the new user to the login page.
pub async fn signup(
    current: CurrentUser,
    State(state): State<AppState>,
    Form(input): Form<SignupForm>,
) -> AppResult<Response> {
    current.permit(Operation::Signup)?;

    let username = input.username.trim();
    validate_username(username)?;
    validate_new_password(&input.password1, &input.password2)?;

    let password_hash = hash_password_async(input.password1).await?;
    let user = state.store.create_user(username, &password_hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok(found(urls::LOGIN))
}
