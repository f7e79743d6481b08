//! Route paths and URL helpers.
//!
//! Handlers and tests build links through these helpers instead of
//! hard-coding paths.

pub const HOME: &str = "/";
pub const NOTE_LIST: &str = "/notes/";
pub const NOTE_ADD: &str = "/add/";
pub const NOTE_SUCCESS: &str = "/done/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";

pub fn note_detail(slug: &str) -> String {
    format!("/note/{slug}/")
}

pub fn note_edit(slug: &str) -> String {
    format!("/edit/{slug}/")
}

pub fn note_delete(slug: &str) -> String {
    format!("/delete/{slug}/")
}

/// Login page URL that sends the user back to `next` afterwards.
pub fn login_redirect(next: &str) -> String {
    format!("{LOGIN}?next={}", encode_query_value(next))
}

/// Percent-encode a query value, leaving unreserved characters and `/` as-is.
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Accept a post-login redirect target only if it stays on this site.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}
