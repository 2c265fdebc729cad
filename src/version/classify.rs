//! Conventional commit classification.

use regex_lite::Regex;

/// Change severity carried by a single commit message.
///
/// Ordered by severity so the bump fold can keep a running maximum:
/// `Breaking > Feature > Fix > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeSignal {
    None,
    Fix,
    Feature,
    Breaking,
}

/// Classify a commit message into its change signal.
///
/// Total over arbitrary strings: malformed or non-conventional messages
/// classify as [`ChangeSignal::None`], never as an error. Priority order:
/// a `BREAKING CHANGE:` footer anywhere in the message, then a `!` marker
/// directly before the header colon, then the header type itself.
pub fn classify(message: &str) -> ChangeSignal {
    // Conventional Commits treats BREAKING-CHANGE as a synonym of
    // BREAKING CHANGE. Both tokens are case-sensitive.
    if message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:") {
        return ChangeSignal::Breaking;
    }

    let first_line = message.lines().next().unwrap_or("");

    // Header grammar: type(optional-scope)!: description
    let re = Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?:\s*").unwrap();

    let Some(caps) = re.captures(first_line) else {
        return ChangeSignal::None;
    };

    if caps.get(3).is_some() {
        return ChangeSignal::Breaking;
    }

    match caps.get(1).map(|m| m.as_str()) {
        Some("feat") => ChangeSignal::Feature,
        Some("fix") => ChangeSignal::Fix,
        _ => ChangeSignal::None,
    }
}
