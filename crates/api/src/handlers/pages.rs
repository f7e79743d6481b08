//! Static pages: home and the post-write success page.

use axum::response::IntoResponse;
use axum::Json;
use notes_core::access::Operation;

use super::StaticPage;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;

/// GET /
pub async fn home(current: CurrentUser) -> AppResult<impl IntoResponse> {
    current.permit(Operation::Home)?;
    Ok(Json(DataResponse {
        data: StaticPage {
            page: "home",
            user: current.user,
        },
    }))
}

/// GET /done/
///
/// Landing page after a note was added, edited or deleted.
pub async fn success(current: CurrentUser) -> AppResult<impl IntoResponse> {
    current.require_user(Operation::Success)?;
    Ok(Json(DataResponse {
        data: StaticPage {
            page: "success",
            user: current.user,
        },
    }))
}
