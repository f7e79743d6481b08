//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- server-side login sessions and the session cookie.

pub mod password;
pub mod session;
