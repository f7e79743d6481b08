use std::sync::Arc;

use notes_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Note and user persistence (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration (session secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
}
