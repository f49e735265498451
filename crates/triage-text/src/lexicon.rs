//! Word → valence table.
//!
//! File format (one entry per line, VADER style):
//!
//! ```text
//! word<TAB>mean-valence[<TAB>anything else...]
//! ```
//!
//! Valences sit on the −4…+4 scale. Blank lines and lines starting with
//! `#` are skipped.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::errors::LexiconError;

const BUNDLED: &str = include_str!("../data/lexicon.tsv");

/// Case-insensitive valence lookup table.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
}

impl Lexicon {
    /// The lexicon shipped with the crate.
    pub fn bundled() -> Result<Self, LexiconError> {
        Self::parse(BUNDLED)
    }

    /// Load a lexicon file.
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&content)?;
        debug!(?path, entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Parse lexicon text.
    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut entries = HashMap::new();
        for (n, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let word = cols.next().map(str::trim).unwrap_or_default();
            let Some(value) = cols.next() else {
                return Err(LexiconError::Parse {
                    line: n + 1,
                    message: format!("missing valence for '{word}'"),
                });
            };
            if word.is_empty() {
                return Err(LexiconError::Parse {
                    line: n + 1,
                    message: "empty word".to_string(),
                });
            }
            let valence: f64 = value.trim().parse().map_err(|_| LexiconError::Parse {
                line: n + 1,
                message: format!("invalid valence '{}' for '{word}'", value.trim()),
            })?;
            let _ = entries.insert(word.to_lowercase(), valence);
        }
        Ok(Self { entries })
    }

    /// Build from pairs, mostly for tests and embedding callers.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(w, v)| (w.as_ref().to_lowercase(), v))
                .collect(),
        }
    }

    /// Valence of a word, if present.
    pub fn get(&self, word: &str) -> Option<f64> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
            .copied()
    }

    /// Whether the word is present.
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn bundled_lexicon_loads() {
        let lex = Lexicon::bundled().unwrap();
        assert!(lex.len() > 200);
        assert_eq!(lex.get("good"), Some(1.9));
        assert!(lex.get("angry").unwrap() < 0.0);
        assert!(lex.get("billing").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let lex = Lexicon::from_pairs([("Good", 1.9)]);
        assert_eq!(lex.get("GOOD"), Some(1.9));
        assert!(lex.contains("good"));
    }

    #[test]
    fn parse_skips_comments_and_extra_columns() {
        let lex = Lexicon::parse("# header\n\ngood\t1.9\t0.9\t[2, 2]\nbad\t-2.5\n").unwrap();
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.get("bad"), Some(-2.5));
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = Lexicon::parse("good\t1.9\nbad\tnope\n").unwrap_err();
        assert_matches!(err, LexiconError::Parse { line: 2, .. });

        let err = Lexicon::parse("lonely\n").unwrap_err();
        assert_matches!(err, LexiconError::Parse { line: 1, .. });
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lex.tsv");
        std::fs::write(&path, "superb\t3.1\n").unwrap();
        let lex = Lexicon::from_path(&path).unwrap();
        assert_eq!(lex.get("superb"), Some(3.1));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lexicon::from_path(&dir.path().join("missing.tsv")).unwrap_err();
        assert_matches!(err, LexiconError::Io { .. });
    }
}
