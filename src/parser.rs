//! Issue body parsing.
//!
//! Issues arrive either through the issue form (rendered as `###` headings
//! with the value on the following line) or as free text containing an
//! `@mention` of the requested user.

use regex::Regex;

/// Requested roster action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add the user to the roster.
    Add,
    /// Remove the user from the roster.
    Remove,
}

impl Action {
    /// Lowercase verb for log lines and commit messages.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Parsed request: who, and what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// GitHub login of the requested user.
    pub login: String,
    /// Requested action.
    pub action: Action,
}

/// Parse an issue body into an [`Intent`].
///
/// The handle is taken from the `### GitHub Handle` form field when present,
/// otherwise from the first `@mention` in the body. Returns `None` when
/// neither matches. The action comes from the `### Modification Type` field
/// and defaults to [`Action::Add`] when absent or unrecognized.
#[must_use]
pub fn parse_intent(body: &str) -> Option<Intent> {
    let login = extract_login(body)?;
    let action = extract_action(body);
    Some(Intent { login, action })
}

fn extract_login(body: &str) -> Option<String> {
    // Issue-form field takes priority over any mention elsewhere in the body.
    let field = Regex::new(r"(?i)###\s*GitHub Handle\s*\n\s*([A-Za-z0-9-]+)")
        .expect("Invalid handle field regex");
    if let Some(captures) = field.captures(body) {
        return Some(captures[1].to_string());
    }

    // Fallback: first @mention wins, deliberately.
    let mention = Regex::new(r"@([A-Za-z0-9-]+)").expect("Invalid mention regex");
    mention
        .captures(body)
        .map(|captures| captures[1].to_string())
}

fn extract_action(body: &str) -> Action {
    let field = Regex::new(r"(?i)###\s*Modification Type\s*\n\s*(add|remove)")
        .expect("Invalid action field regex");
    match field.captures(body) {
        Some(captures) if captures[1].eq_ignore_ascii_case("remove") => Action::Remove,
        _ => Action::Add,
    }
}
