//! Tone summary settings and the emotion marker table.

use serde::{Deserialize, Serialize};

use super::words;

/// One emotion category and the substrings that signal it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionCategory {
    /// Category name (`joy`, `anger`, ...).
    pub name: String,
    /// Lowercase substrings; a token containing any of them counts.
    pub markers: Vec<String>,
}

impl EmotionCategory {
    fn new(name: &str, markers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            markers: words(markers),
        }
    }
}

/// Tone labelling thresholds and the ordered emotion table.
///
/// Ties between emotions resolve to the earlier table entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToneSettings {
    /// `|compound|` at or above this is `very`.
    pub strong_threshold: f64,
    /// `|compound|` at or above this is `moderately`.
    pub moderate_threshold: f64,
    /// `|compound|` at or above this carries a positive/negative label.
    pub label_threshold: f64,
    /// Number of strong words to report.
    pub top_k: usize,
    /// Words with `|adjusted|` at or below this are never strong words.
    pub strong_word_min: f64,
    /// Ordered emotion table.
    pub emotions: Vec<EmotionCategory>,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            strong_threshold: 0.6,
            moderate_threshold: 0.25,
            label_threshold: 0.05,
            top_k: 3,
            strong_word_min: 0.01,
            emotions: vec![
                EmotionCategory::new(
                    "joy",
                    &["happy", "joy", "love", "delighted", "pleased", "glad", "excited", "enjoy"],
                ),
                EmotionCategory::new(
                    "anger",
                    &["angry", "enraged", "furious", "hate", "annoyed", "irritat", "rage"],
                ),
                EmotionCategory::new(
                    "sadness",
                    &["sad", "unhappy", "depressed", "mourn", "sorrow", "sorry", "gloom"],
                ),
                EmotionCategory::new(
                    "fear",
                    &["afraid", "scared", "fear", "terrified", "panic", "worried", "anxious"],
                ),
                EmotionCategory::new(
                    "surprise",
                    &["surprise", "shocked", "astonish", "amazed", "wow"],
                ),
                EmotionCategory::new(
                    "disgust",
                    &["disgust", "gross", "nasty", "sick", "revolting", "repuls"],
                ),
            ],
        }
    }
}
