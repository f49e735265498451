//! Lexicon loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a lexicon resource.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The lexicon file could not be read.
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A line did not have the `word<TAB>valence` shape.
    #[error("lexicon line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },
}
