//! Slug derivation, validation, and assignment for notes.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::translit::transliterate;

/// Maximum length of a note slug, in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// The slug is already used by another note.
    #[error("slug '{0}' is already taken")]
    DuplicateSlug(String),

    /// The title produced no usable characters.
    #[error("cannot derive a slug from title '{0}'")]
    Empty(String),
}

impl From<SlugError> for CoreError {
    fn from(err: SlugError) -> Self {
        match err {
            SlugError::DuplicateSlug(slug) => CoreError::DuplicateSlug(slug),
            SlugError::Empty(_) => CoreError::validation(
                "slug",
                "Could not derive an address from the title, please enter one",
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Existing slugs
// ---------------------------------------------------------------------------

/// Read-only view of the slugs already taken.
pub trait SlugLookup {
    fn contains(&self, slug: &str) -> bool;
}

impl SlugLookup for HashSet<String> {
    fn contains(&self, slug: &str) -> bool {
        HashSet::contains(self, slug)
    }
}

impl SlugLookup for [&str] {
    fn contains(&self, slug: &str) -> bool {
        self.iter().any(|s| *s == slug)
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Build a URL-safe slug from arbitrary text.
///
/// Transliterates Cyrillic, lowercases, drops anything that is not an ASCII
/// alphanumeric, `_`, `-` or whitespace, collapses whitespace/hyphen runs to
/// a single hyphen, and trims leading/trailing hyphens and underscores.
pub fn slugify(text: &str) -> String {
    let latin = transliterate(text).to_lowercase();

    let mut result = String::with_capacity(latin.len());
    let mut pending_hyphen = false;
    for c in latin.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !result.is_empty() {
                result.push('-');
            }
            pending_hyphen = false;
            result.push(c);
        }
    }

    result.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Truncate a slug to [`MAX_SLUG_LENGTH`] characters.
fn truncate(slug: String) -> String {
    if slug.chars().count() <= MAX_SLUG_LENGTH {
        slug
    } else {
        slug.chars().take(MAX_SLUG_LENGTH).collect()
    }
}

/// Validate a user-supplied slug: non-empty, bounded, `[-a-zA-Z0-9_]+`.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::validation("slug", "Slug must not be empty"));
    }
    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(CoreError::validation(
            "slug",
            format!("Slug must be at most {MAX_SLUG_LENGTH} characters long"),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::validation(
            "slug",
            "Slug may contain only Latin letters, digits, underscores and hyphens",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Pick the slug a note will be stored under.
///
/// An explicit, non-empty slug is used as-is when free. Otherwise the slug is
/// derived from `title`. Either way a value already present in `existing`
/// fails with [`SlugError::DuplicateSlug`] carrying that value.
pub fn assign_slug<L: SlugLookup + ?Sized>(
    title: &str,
    explicit_slug: Option<&str>,
    existing: &L,
) -> Result<String, SlugError> {
    let slug = match explicit_slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => {
            let derived = truncate(slugify(title));
            if derived.is_empty() {
                return Err(SlugError::Empty(title.to_string()));
            }
            derived
        }
    };

    if existing.contains(&slug) {
        return Err(SlugError::DuplicateSlug(slug));
    }
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn taken(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    // -- slugify ---------------------------------------------------------------

    #[test]
    fn slugify_cyrillic_title() {
        assert_eq!(slugify("Заметка"), "zametka");
        assert_eq!(slugify("Новая заметка"), "novaya-zametka");
    }

    #[test]
    fn slugify_strips_punctuation_and_collapses() {
        assert_eq!(slugify("How to: Use Notes (v2)"), "how-to-use-notes-v2");
        assert_eq!(slugify("foo -- bar"), "foo-bar");
        assert_eq!(slugify("  --hello--  "), "hello");
        assert_eq!(slugify("_under_"), "under");
    }

    #[test]
    fn slugify_drops_untransliterable_characters() {
        assert_eq!(slugify("café ☕"), "caf");
        assert_eq!(slugify("!!!"), "");
    }

    // -- validate_slug ---------------------------------------------------------

    #[test]
    fn validate_slug_accepts_slug_alphabet() {
        assert!(validate_slug("my-note_2").is_ok());
        assert!(validate_slug("CamelCase").is_ok());
    }

    #[test]
    fn validate_slug_rejects_bad_input() {
        assert_matches!(validate_slug(""), Err(CoreError::Validation { field: "slug", .. }));
        assert_matches!(
            validate_slug("has space"),
            Err(CoreError::Validation { field: "slug", .. })
        );
        assert_matches!(
            validate_slug("заметка"),
            Err(CoreError::Validation { field: "slug", .. })
        );
        let long = "a".repeat(MAX_SLUG_LENGTH + 1);
        assert!(validate_slug(&long).is_err());
    }

    // -- assign_slug -----------------------------------------------------------

    #[test]
    fn explicit_free_slug_is_kept() {
        let slug = assign_slug("Заметка", Some("my-note"), &taken(&["other"])).unwrap();
        assert_eq!(slug, "my-note");
    }

    #[test]
    fn explicit_taken_slug_reports_that_slug() {
        let result = assign_slug("Заметка", Some("my-note"), &taken(&["my-note"]));
        assert_eq!(result, Err(SlugError::DuplicateSlug("my-note".into())));
    }

    #[test]
    fn missing_slug_is_derived_from_title() {
        let slug = assign_slug("Заметка", None, &taken(&[])).unwrap();
        assert_eq!(slug, slugify("Заметка"));
    }

    #[test]
    fn blank_slug_counts_as_missing() {
        let slug = assign_slug("Заметка", Some("  "), &taken(&[])).unwrap();
        assert_eq!(slug, "zametka");
    }

    #[test]
    fn derived_slug_collision_is_rejected() {
        let result = assign_slug("Заметка", None, &taken(&["zametka"]));
        assert_eq!(result, Err(SlugError::DuplicateSlug("zametka".into())));
    }

    #[test]
    fn derived_slug_is_truncated() {
        let title = "a".repeat(MAX_SLUG_LENGTH + 50);
        let slug = assign_slug(&title, None, &taken(&[])).unwrap();
        assert_eq!(slug.len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn title_without_usable_characters_fails() {
        let result = assign_slug("!!!", None, &taken(&[]));
        assert_matches!(result, Err(SlugError::Empty(_)));
    }

    #[test]
    fn slice_lookup_is_supported() {
        let existing: &[&str] = &["busy"];
        assert!(assign_slug("x", Some("busy"), existing).is_err());
        assert!(assign_slug("x", Some("free"), existing).is_ok());
    }

    #[test]
    fn slug_error_converts_to_core_error() {
        let err: CoreError = SlugError::DuplicateSlug("dup".into()).into();
        assert_matches!(err, CoreError::DuplicateSlug(ref s) if s == "dup");
    }
}
