//! Errors raised while assembling the scoring pipeline.
//!
//! Scoring itself is total; only construction can fail.

use thiserror::Error;
use triage_overrides::OverrideError;
use triage_settings::SettingsError;
use triage_text::LexiconError;

/// Failure building an [`Analyzer`](crate::Analyzer) or one of its parts.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Lexicon could not be loaded.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    /// Override rules could not be built.
    #[error(transparent)]
    Override(#[from] OverrideError),

    /// A priority keyword table failed to compile.
    #[error("invalid priority keyword: {0}")]
    Keywords(#[from] regex::Error),
}
