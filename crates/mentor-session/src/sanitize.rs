//! Hint text sanitization.
//!
//! Remote hint content is untrusted free text. Before it is stored or
//! shown it passes through one normalization pipeline: collapse all runs
//! of whitespace (including newlines and tabs) to single spaces, trim the
//! ends, and cap the length. The cap cuts on a character boundary so a
//! multi-byte character is never split.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a sanitized hint, in characters.
pub const MAX_HINT_LEN: usize = 240;

static WHITESPACE: Lazy<Regex> = Lazy::new(compile_whitespace);

// Literal pattern, cannot fail.
#[allow(clippy::unwrap_used)]
fn compile_whitespace() -> Regex {
    Regex::new(r"\s+").unwrap()
}

/// Sanitizes hint text with the default length cap.
#[must_use]
pub fn sanitize(text: &str) -> String {
    sanitize_with_limit(text, MAX_HINT_LEN)
}

/// Sanitizes hint text, capping it at `limit` characters.
///
/// Whitespace runs collapse to single spaces, leading and trailing
/// whitespace is removed, and anything past the cap is dropped.
#[must_use]
pub fn sanitize_with_limit(text: &str, limit: usize) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let trimmed = collapsed.trim();

    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }

    trimmed.chars().take(limit).collect()
}

// ============================================================================
// Tests
// ============================================================================
