//! Redirect intents and path helpers.

/// Query parameter carrying the path to return to after PIN entry.
pub const REDIRECT_PARAM: &str = "redirect";

/// Where to send the user, and where they were headed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Route path to navigate to (the PIN route).
    pub target: String,
    /// Full path (including query) of the originally requested destination.
    pub redirect: String,
}

impl NavigationIntent {
    #[must_use]
    pub fn pin_entry(pin_path: &str, redirect: &str) -> Self {
        Self { target: pin_path.to_owned(), redirect: redirect.to_owned() }
    }

    /// `target?redirect=<encoded>`, ready for a router navigation.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}?{REDIRECT_PARAM}={}", self.target, urlencoding::encode(&self.redirect))
    }
}

/// Path part of a full path: query and fragment removed, trailing slash
/// dropped except for the root.
#[must_use]
pub fn path_only(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    let path = &full_path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Decide where a successful PIN entry returns to.
///
/// Only local absolute paths are honored; anything else (missing, external,
/// protocol-relative, containing whitespace or control characters, or the PIN
/// route itself) falls back to `/`.
#[must_use]
pub fn redirect_target(raw: Option<&str>, pin_path: &str) -> String {
    let Some(raw) = raw.map(str::trim) else {
        return "/".to_owned();
    };
    // Browsers drop tab, CR and LF while parsing, so "/\t/host" would turn
    // protocol-relative after the check below.
    if raw.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return "/".to_owned();
    }
    let local = raw.starts_with('/') && !raw.starts_with("//") && !raw.contains('\\');
    if !local || path_only(raw) == pin_path {
        return "/".to_owned();
    }
    raw.to_owned()
}

#[cfg(test)]
#[path = "intent_test.rs"]
mod tests;
