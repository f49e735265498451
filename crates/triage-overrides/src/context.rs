//! Pre-split text handed to every rule.

use triage_text::split_sentences;

/// One sentence in original and lowercase form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanSentence {
    /// As written.
    pub raw: String,
    /// Lowercase form for literal substring checks.
    pub lower: String,
}

/// The text under scan, split once and shared by all rules.
#[derive(Clone, Debug)]
pub struct ScanContext {
    /// Whole text as written.
    pub text: String,
    /// Sentences in order.
    pub sentences: Vec<ScanSentence>,
}

impl ScanContext {
    /// Split `text` into sentences.
    pub fn new(text: &str) -> Self {
        let sentences = split_sentences(text)
            .into_iter()
            .map(|raw| {
                let lower = raw.to_lowercase();
                ScanSentence { raw, lower }
            })
            .collect();
        Self {
            text: text.to_string(),
            sentences,
        }
    }
}
