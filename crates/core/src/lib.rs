//! Domain building blocks for the notes service.
//!
//! Everything in this crate is pure: no I/O, no async. The API and storage
//! crates depend on it for ids, errors, the note access policy, and slug
//! handling.

pub mod access;
pub mod error;
pub mod forms;
pub mod slug;
pub mod translit;
pub mod types;
