//! Per-token and per-sentence analysis records.
//!
//! These are produced by the lexicon scorer and consumed by the tone
//! summarizer and the presentation layer. They are created once per
//! analysis call and never patched afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A word-like or punctuation token within a sentence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Surface form as it appeared in the text.
    pub surface: String,
    /// Lowercase normal form used for table lookups.
    pub normal: String,
    /// Position within the sentence.
    pub index: usize,
}

impl Token {
    /// Build a token, deriving the lowercase normal form.
    pub fn new(surface: impl Into<String>, index: usize) -> Self {
        let surface = surface.into();
        let normal = surface.to_lowercase();
        Self {
            surface,
            normal,
            index,
        }
    }

    /// Whether the token starts with a word character (letter, digit or `_`).
    pub fn is_wordlike(&self) -> bool {
        self.surface
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }
}

/// How one token contributed to its sentence's structure score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordContribution {
    /// The token's surface form.
    pub token: String,
    /// Lexicon valence (0.0 when the word is not in the lexicon).
    pub base_valence: f64,
    /// Valence after booster, negation and punctuation adjustments.
    pub adjusted_valence: f64,
    /// Adjustments applied, in order (e.g. `lexicon`, `booster(very=1.5)`).
    pub notes: Vec<String>,
}

impl WordContribution {
    /// Whether this row is worth showing (has a valence or any note).
    pub fn is_meaningful(&self) -> bool {
        self.base_valence != 0.0 || !self.notes.is_empty()
    }
}

/// Structure-aware account of one sentence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAnalysis {
    /// The sentence text.
    pub text: String,
    /// One contribution per token, in token order.
    pub contributions: Vec<WordContribution>,
    /// Sum of all adjusted valences.
    pub structure_score: f64,
    /// Polarity of the whole sentence from the base scorer.
    pub base_polarity: PolarityScores,
}

/// Output of the general-purpose base polarity scorer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of positive signal.
    pub pos: f64,
    /// Proportion of neutral signal.
    pub neu: f64,
    /// Proportion of negative signal.
    pub neg: f64,
    /// Normalized overall polarity in `[-1, 1]`.
    pub compound: f64,
}

impl PolarityScores {
    /// Label for this score's compound value.
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Three-way sentiment bucket for a compound score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Compound at or above `+0.05`.
    Positive,
    /// Compound strictly between `-0.05` and `+0.05`.
    Neutral,
    /// Compound at or below `-0.05`.
    Negative,
}

impl SentimentLabel {
    /// Bucket boundary on either side of zero.
    pub const THRESHOLD: f64 = 0.05;

    /// Bucket a compound score.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= Self::THRESHOLD {
            Self::Positive
        } else if compound <= -Self::THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lowercases_normal_form() {
        let t = Token::new("HELP", 3);
        assert_eq!(t.normal, "help");
        assert_eq!(t.surface, "HELP");
        assert_eq!(t.index, 3);
        assert!(t.is_wordlike());
        assert!(!Token::new("!", 0).is_wordlike());
    }

    #[test]
    fn label_boundaries() {
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
    }

    #[test]
    fn contribution_serializes_camel_case() {
        let c = WordContribution {
            token: "good".into(),
            base_valence: 1.9,
            adjusted_valence: 1.9,
            notes: vec!["lexicon".into()],
        };
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("baseValence").is_some());
        assert!(json.get("adjustedValence").is_some());
        assert!(c.is_meaningful());
    }

    #[test]
    fn zero_row_without_notes_is_not_meaningful() {
        let c = WordContribution {
            token: "the".into(),
            base_valence: 0.0,
            adjusted_valence: 0.0,
            notes: Vec::new(),
        };
        assert!(!c.is_meaningful());
    }

    #[test]
    fn polarity_label_delegates_to_compound() {
        let p = PolarityScores {
            compound: -0.4,
            ..PolarityScores::default()
        };
        assert_eq!(p.label(), SentimentLabel::Negative);
        assert_eq!(p.label().to_string(), "negative");
    }
}
