//! Link rule entity - ordered rewrite instruction for URLs and anchor text

use serde::Deserialize;

/// Stored link-rewrite rule
///
/// Rules are applied in ascending `id` order, which is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRule {
    pub id: i64,
    /// Case-insensitive regular expression matched against a URL
    pub pattern: String,
    /// Substitution template for the matched part of the URL (`$1`, `${name}`)
    pub replacement: String,
    /// Replaces an anchor's visible text when `pattern` matched its href
    pub text_replacement: Option<String>,
}

impl LinkRule {
    #[must_use]
    pub fn new(
        id: i64,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        text_replacement: Option<String>,
    ) -> Self {
        Self {
            id,
            pattern: pattern.into(),
            replacement: replacement.into(),
            text_replacement,
        }
    }
}

/// Rule as submitted by an admin, before it gets an id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewLinkRule {
    pub pattern: String,
    pub replacement: String,
    pub text_replacement: Option<String>,
}
