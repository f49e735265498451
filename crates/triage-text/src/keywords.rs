//! Keyword tables matched case-insensitively as whole words.
//!
//! `rob` matches "rob" but not "robust" or "problem". A trailing `*` marks a
//! stem that also matches longer words: `injur*` matches "injured" and
//! "injury". Word boundaries apply only at ends that are word characters, so
//! `help!` matches "HELP!!!". Multi-word keywords match literally.

use regex::Regex;

/// An ordered, compiled keyword table.
#[derive(Clone, Debug, Default)]
pub struct KeywordSet {
    entries: Vec<(String, Regex)>,
}

impl KeywordSet {
    /// Compile keywords, keeping table order. Blank entries are skipped and
    /// duplicates kept once. Stems are reported without their `*`.
    pub fn new<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, Regex)> = Vec::new();
        for kw in keywords {
            let raw = kw.as_ref().trim().to_lowercase();
            let (kw, stem) = match raw.strip_suffix('*') {
                Some(s) => (s.trim_end().to_string(), true),
                None => (raw, false),
            };
            if kw.is_empty() || entries.iter().any(|(k, _)| *k == kw) {
                continue;
            }
            let lead = if kw.chars().next().is_some_and(is_word_char) {
                r"\b"
            } else {
                ""
            };
            let trail = if !stem && kw.chars().next_back().is_some_and(is_word_char) {
                r"\b"
            } else {
                ""
            };
            let pattern = format!("(?i){lead}{}{trail}", regex::escape(&kw));
            entries.push((kw, Regex::new(&pattern)?));
        }
        Ok(Self { entries })
    }

    /// Every keyword present in `text`, in table order.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(kw, _)| kw.as_str())
            .collect()
    }

    /// First keyword (in table order) present in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(kw, _)| kw.as_str())
    }

    /// Whether any keyword is present.
    pub fn is_match(&self, text: &str) -> bool {
        self.entries.iter().any(|(_, re)| re.is_match(text))
    }

    /// Keywords in table order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(kw, _)| kw.as_str())
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
