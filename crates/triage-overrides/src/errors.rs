//! Error types for the override engine.

use thiserror::Error;

/// Errors raised while building override rules.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// A rule's configuration is unusable.
    #[error("invalid override rule {rule_id}: {message}")]
    InvalidRule {
        /// Offending rule.
        rule_id: String,
        /// What was wrong.
        message: String,
    },

    /// A keyword or positional pattern failed to compile.
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}
