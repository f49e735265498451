//! Sentence splitting and word tokenization.
//!
//! Word tokenization prefers a [`TokenizerProvider`] and falls back to the
//! regex rule `\b[\w']+\b|[^\s\w]` whenever the provider is missing or
//! declines. The fallback needs no resources and never fails.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use triage_core::Token;
use triage_settings::TokenizerKind;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break regex"));

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w']+\b|[^\s\w]").expect("word regex"));

/// Split text after sentence-final punctuation followed by whitespace.
///
/// Pieces are trimmed and empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // the punctuation char is ASCII, so +1 stays on a char boundary
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// Regex word tokenization: apostrophe-bearing word runs or single
/// non-space, non-word characters.
pub fn regex_words(text: &str) -> Vec<String> {
    WORD_RUN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────────────────────────────────────

/// An optional, higher-quality word tokenizer.
///
/// Returning `None` means the resource is unavailable for this input; the
/// caller then uses the regex rule.
pub trait TokenizerProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Tokenize `text`, or `None` when unavailable.
    fn tokenize(&self, text: &str) -> Option<Vec<String>>;
}

/// Treebank-style tokenizer that separates punctuation and clitics.
///
/// `can't` → `ca` `n't`, `I'm` → `I` `'m`, `cannot` → `can` `not`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreebankTokenizer;

const CLITICS: [&str; 6] = ["'s", "'m", "'re", "'ve", "'ll", "'d"];

const SPLIT_COMPOUNDS: [(&str, usize); 4] =
    [("cannot", 3), ("gonna", 3), ("gotta", 3), ("wanna", 3)];

impl TreebankTokenizer {
    fn push_core(out: &mut Vec<String>, core: &str) {
        if core.is_empty() {
            return;
        }
        let lower = core.to_ascii_lowercase();

        if let Some((_, at)) = SPLIT_COMPOUNDS.iter().find(|(w, _)| *w == lower) {
            out.push(core[..*at].to_string());
            out.push(core[*at..].to_string());
            return;
        }
        if lower.len() > 3 && lower.ends_with("n't") {
            let at = core.len() - 3;
            out.push(core[..at].to_string());
            out.push(core[at..].to_string());
            return;
        }
        for clitic in CLITICS {
            if lower.len() > clitic.len() && lower.ends_with(clitic) {
                let at = core.len() - clitic.len();
                out.push(core[..at].to_string());
                out.push(core[at..].to_string());
                return;
            }
        }
        out.push(core.to_string());
    }
}

impl TokenizerProvider for TreebankTokenizer {
    fn name(&self) -> &'static str {
        "treebank"
    }

    fn tokenize(&self, text: &str) -> Option<Vec<String>> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            let core_start = chunk
                .char_indices()
                .find(|(_, c)| c.is_alphanumeric())
                .map_or(chunk.len(), |(i, _)| i);
            let core_end = chunk
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_alphanumeric() || *c == '\'')
                .map_or(core_start, |(i, c)| i + c.len_utf8())
                .max(core_start);

            tokens.extend(chunk[..core_start].chars().map(String::from));
            Self::push_core(&mut tokens, &chunk[core_start..core_end]);
            tokens.extend(chunk[core_end..].chars().map(String::from));
        }
        Some(tokens)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────────────────────────────────────

/// Word tokenizer with a guaranteed regex fallback.
pub struct Tokenizer {
    provider: Option<Box<dyn TokenizerProvider>>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::from_kind(TokenizerKind::default())
    }
}

impl Tokenizer {
    /// Tokenizer that only uses the regex rule.
    pub fn regex_only() -> Self {
        Self { provider: None }
    }

    /// Tokenizer preferring the given provider.
    pub fn with_provider(provider: impl TokenizerProvider + 'static) -> Self {
        Self {
            provider: Some(Box::new(provider)),
        }
    }

    /// Tokenizer for a configured kind.
    pub fn from_kind(kind: TokenizerKind) -> Self {
        match kind {
            TokenizerKind::Treebank => Self::with_provider(TreebankTokenizer),
            TokenizerKind::Regex => Self::regex_only(),
        }
    }

    /// Split into sentences.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        split_sentences(text)
    }

    /// Split into word and punctuation tokens.
    pub fn split_words(&self, text: &str) -> Vec<String> {
        if let Some(provider) = &self.provider {
            if let Some(tokens) = provider.tokenize(text) {
                return tokens;
            }
            debug!(provider = provider.name(), "tokenizer unavailable, using regex fallback");
        }
        regex_words(text)
    }

    /// Split into [`Token`]s with lowercase normal forms.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        self.split_words(text)
            .into_iter()
            .enumerate()
            .map(|(i, w)| Token::new(w, i))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
