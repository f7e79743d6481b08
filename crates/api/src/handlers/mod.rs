//! Request handlers for the note and account pages.
//!
//! Each submodule provides async handler functions for one group of pages.
//! Handlers run the access policy through [`CurrentUser`], delegate to the
//! store in [`AppState`], and map errors via [`AppError`].
//!
//! [`CurrentUser`]: crate::middleware::auth::CurrentUser
//! [`AppState`]: crate::state::AppState
//! [`AppError`]: crate::error::AppError

use std::collections::BTreeMap;

use notes_db::models::user::UserResponse;
use serde::Serialize;

pub mod notes;
pub mod pages;
pub mod users;

/// Description of a form for a page context.
#[derive(Debug, Serialize)]
pub struct FormContext {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub initial: BTreeMap<&'static str, String>,
}

impl FormContext {
    pub fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            initial: BTreeMap::new(),
        }
    }

    pub fn with_initial(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.initial.insert(field, value.into());
        self
    }
}

/// Context of a static page (home, success, logout).
#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Context of a page that shows a single form (login, signup).
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: FormContext,
}
