#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::Session;

use notes_api::auth::session::{start_session, SessionConfig, SESSION_COOKIE};
use notes_api::config::ServerConfig;
use notes_api::router::build_app_router;
use notes_api::state::AppState;
use notes_api::urls::encode_query_value;
use notes_db::models::note::{NewNote, Note};
use notes_db::models::user::User;
use notes_db::{MemoryStore, NoteStore, UserStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        session: SessionConfig {
            expiry_mins: 60,
            cookie_secure: false,
        },
    }
}

/// Router plus handles on the note and session stores behind it.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub sessions: tower_sessions::MemoryStore,
    pub config: ServerConfig,
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = MemoryStore::new();
    let sessions = tower_sessions::MemoryStore::default();

    let state = AppState {
        store: Arc::new(store.clone()),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config, sessions.clone()),
        store,
        sessions,
        config,
    }
}

impl TestApp {
    /// Create a user without going through signup. The password hash is a
    /// placeholder, so the account can only be used via [`TestApp::login_cookie`].
    pub async fn create_user(&self, username: &str) -> User {
        self.store
            .create_user(username, "not-a-real-hash")
            .await
            .expect("user creation should succeed")
    }

    /// `Cookie` header value of a logged-in session for `user`, stored
    /// straight in the session store.
    pub async fn login_cookie(&self, user: &User) -> String {
        let session = Session::new(None, Arc::new(self.sessions.clone()), None);
        start_session(&session, user.id)
            .await
            .expect("session should start");
        session.save().await.expect("session should be saved");
        let id = session.id().expect("saved session must have an id");
        format!("{SESSION_COOKIE}={id}")
    }

    /// Create a user and return it with its session cookie.
    pub async fn logged_in(&self, username: &str) -> (User, String) {
        let user = self.create_user(username).await;
        let cookie = self.login_cookie(&user).await;
        (user, cookie)
    }

    /// Insert a note straight into the store.
    pub async fn create_note(&self, author: &User, title: &str, text: &str, slug: &str) -> Note {
        self.store
            .create(
                author.id,
                &NewNote {
                    title: title.to_string(),
                    text: text.to_string(),
                    slug: slug.to_string(),
                },
            )
            .await
            .expect("note creation should succeed")
    }

    pub async fn note_count(&self) -> i64 {
        self.store.count().await.expect("count should succeed")
    }

    pub async fn note(&self, slug: &str) -> Option<Note> {
        self.store.get_by_slug(slug).await.expect("lookup should succeed")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        send(self.router.clone(), Method::GET, uri, cookie, None).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        send(
            self.router.clone(),
            Method::POST,
            uri,
            cookie,
            Some(form_body(fields)),
        )
        .await
    }

    /// POST `body` as-is, with `content_type` when given.
    pub async fn post_raw(
        &self,
        uri: &str,
        cookie: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        send(self.router.clone(), Method::DELETE, uri, cookie, None).await
    }
}

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    form: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form)
        }
        None => Body::empty(),
    };

    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Encode `fields` as an `application/x-www-form-urlencoded` body.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode_query_value(name), encode_query_value(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
