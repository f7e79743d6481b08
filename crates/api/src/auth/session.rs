//! Server-side login sessions.
//!
//! The browser only holds a random session id in the HttpOnly
//! [`SESSION_COOKIE`]. The logged-in user's id lives in the session record
//! under [`SESSION_USER_ID_KEY`], so logging out deletes the record and the
//! old cookie stops working.

use notes_core::types::UserId;
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::session::Error as SessionError;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "sessionid";

/// Session key under which the logged-in user's id is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Default session lifetime in minutes (two weeks).
const DEFAULT_SESSION_EXPIRY_MINS: i64 = 60 * 24 * 14;

/// Configuration for the session cookie.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minutes of inactivity after which a session expires.
    pub expiry_mins: i64,
    /// Whether to mark the cookie `Secure` (HTTPS only).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Default  |
    /// |-------------------------|----------|
    /// | `SESSION_EXPIRY_MINS`   | `20160`  |
    /// | `SESSION_COOKIE_SECURE` | `false`  |
    pub fn from_env() -> Self {
        let expiry_mins: i64 = std::env::var("SESSION_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_MINS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_MINS must be a valid i64");

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            expiry_mins,
            cookie_secure,
        }
    }

    /// Session middleware keeping its records in `store`.
    pub fn layer<S>(&self, store: S) -> SessionManagerLayer<S>
    where
        S: SessionStore + Clone,
    {
        SessionManagerLayer::new(store)
            .with_name(SESSION_COOKIE)
            .with_http_only(true)
            .with_same_site(SameSite::Lax)
            .with_secure(self.cookie_secure)
            .with_expiry(Expiry::OnInactivity(Duration::minutes(self.expiry_mins)))
    }
}

/// The user id stored in `session`, if someone is logged in.
pub async fn session_user_id(session: &Session) -> Result<Option<UserId>, SessionError> {
    session.get(SESSION_USER_ID_KEY).await
}

/// Bind `session` to `user_id` under a fresh session id.
pub async fn start_session(session: &Session, user_id: UserId) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user_id).await
}

/// Delete the session record and expire the cookie.
pub async fn end_session(session: &Session) -> Result<(), SessionError> {
    session.flush().await
}
