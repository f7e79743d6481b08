//! Field validation for the note and account forms.
//!
//! Each validator returns the first problem it finds as a
//! [`CoreError::Validation`] naming the offending field.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a note title in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length of note text in characters.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Maximum length of a username in characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Field names rendered by the note form, in display order.
pub const NOTE_FORM_FIELDS: &[&str] = &["title", "text", "slug"];

/// Field names rendered by the login form.
pub const LOGIN_FORM_FIELDS: &[&str] = &["username", "password"];

/// Field names rendered by the signup form.
pub const SIGNUP_FORM_FIELDS: &[&str] = &["username", "password1", "password2"];

// ---------------------------------------------------------------------------
// Note form
// ---------------------------------------------------------------------------

/// Validate a note title: non-blank and at most [`MAX_TITLE_LENGTH`] chars.
///
/// Surrounding whitespace is not counted, since it is not stored.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::validation("title", "This field is required"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::validation(
            "title",
            format!("Title must be at most {MAX_TITLE_LENGTH} characters long"),
        ));
    }
    Ok(())
}

/// Validate note text: non-blank and at most [`MAX_TEXT_LENGTH`] chars.
pub fn validate_text(text: &str) -> Result<(), CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::validation("text", "This field is required"));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(CoreError::validation(
            "text",
            format!("Text must be at most {MAX_TEXT_LENGTH} characters long"),
        ));
    }
    Ok(())
}

/// Validate the title/text pair of a note form.
///
/// The slug is checked separately since it may be derived.
pub fn validate_note_fields(title: &str, text: &str) -> Result<(), CoreError> {
    validate_title(title)?;
    validate_text(text)
}

// ---------------------------------------------------------------------------
// Account forms
// ---------------------------------------------------------------------------

/// Validate a username: non-empty, bounded, letters/digits and `@.+-_` only.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::validation("username", "This field is required"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::validation(
            "username",
            format!("Username must be at most {MAX_USERNAME_LENGTH} characters long"),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(CoreError::validation(
            "username",
            "Username may contain only letters, digits and @/./+/-/_ characters",
        ));
    }
    Ok(())
}

/// Validate the two password fields of the signup form.
pub fn validate_new_password(password1: &str, password2: &str) -> Result<(), CoreError> {
    if password1.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::validation(
            "password1",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }
    if password1 != password2 {
        return Err(CoreError::validation(
            "password2",
            "The two password fields didn't match",
        ));
    }
    Ok(())
}
