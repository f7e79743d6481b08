//! Request extractors.
//!
//! - [`auth::CurrentUser`] -- resolves the requester from the session and
//!   applies the note access policy.

pub mod auth;
