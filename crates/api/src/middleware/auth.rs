//! Session-based requester extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use notes_core::access::{authorize, Decision, Operation, Owned, Requester};
use notes_core::error::CoreError;
use notes_core::types::UserId;
use notes_db::models::note::Note;
use notes_db::models::user::UserResponse;
use tower_sessions::Session;

use crate::auth::session::session_user_id;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Whoever sent the request, resolved from the login session.
///
/// Never rejects for missing credentials: anonymous requests yield
/// [`Requester::Anonymous`]. Handlers then run the access policy through
/// [`CurrentUser::permit`], [`CurrentUser::require_user`] or
/// [`CurrentUser::require_owner`]:
///
/// ```ignore
/// async fn my_handler(current: CurrentUser) -> AppResult<Json<()>> {
///     let user_id = current.require_user(Operation::List)?;
///     tracing::info!(user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub requester: Requester,
    /// Account details when logged in.
    pub user: Option<UserResponse>,
    /// Path and query of the request, used as the post-login `next` target.
    pub path: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;

        let user = match session_user_id(&session).await? {
            // A session of a deleted account counts as anonymous.
            Some(user_id) => state.store.find_user_by_id(user_id).await?,
            None => None,
        };

        let requester = match &user {
            Some(user) => Requester::User(user.id),
            None => Requester::Anonymous,
        };

        Ok(CurrentUser {
            requester,
            user: user.as_ref().map(UserResponse::from),
            path,
        })
    }
}

impl CurrentUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.requester.user_id()
    }

    /// Turn a policy decision into a handler result.
    fn enforce(&self, decision: Decision, slug: Option<&str>) -> AppResult<()> {
        match decision {
            Decision::Allow => Ok(()),
            Decision::RequireLogin => Err(AppError::LoginRequired {
                next: self.path.clone(),
            }),
            Decision::NotFound => Err(CoreError::note_not_found(slug.unwrap_or_default()).into()),
        }
    }

    /// Check an operation that does not target a note.
    pub fn permit(&self, operation: Operation) -> AppResult<()> {
        self.enforce(authorize::<Note>(self.requester, None, operation), None)
    }

    /// Check an operation that needs a logged-in user and return their id.
    pub fn require_user(&self, operation: Operation) -> AppResult<UserId> {
        self.permit(operation)?;
        self.user_id().ok_or_else(|| AppError::LoginRequired {
            next: self.path.clone(),
        })
    }

    /// Check an owner-only operation on the note looked up by `slug`.
    ///
    /// Returns the note when the requester owns it. A missing note and a note
    /// owned by someone else produce the same not-found error.
    pub fn require_owner<N: Owned>(
        &self,
        operation: Operation,
        note: Option<N>,
        slug: &str,
    ) -> AppResult<N> {
        self.enforce(authorize(self.requester, note.as_ref(), operation), Some(slug))?;
        note.ok_or_else(|| CoreError::note_not_found(slug).into())
    }
}
