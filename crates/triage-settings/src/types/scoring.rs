//! Structure-scoring settings: negation, boosters and punctuation emphasis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::words;

/// Per-token adjustment tables for the structure scorer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringSettings {
    /// How many preceding tokens are scanned for a negation word.
    pub negation_window: usize,
    /// Multiplier applied to a negated non-zero valence.
    pub negation_scalar: f64,
    /// Negation words (lowercase).
    pub negations: Vec<String>,
    /// Booster word → multiplier, applied when the booster directly precedes.
    pub boosters: BTreeMap<String, f64>,
    /// At most this many `!` count towards emphasis.
    pub exclamation_cap: usize,
    /// Emphasis added per counted `!`.
    pub exclamation_weight: f64,
    /// At most this many `?` count towards emphasis.
    pub question_cap: usize,
    /// Emphasis added per counted `?`.
    pub question_weight: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let boosters = [
            ("very", 1.5),
            ("extremely", 2.0),
            ("really", 1.4),
            ("quite", 1.2),
            ("too", 1.2),
            ("so", 1.4),
            ("absolutely", 1.8),
            ("slightly", 0.5),
            ("barely", 0.5),
        ]
        .into_iter()
        .map(|(w, f)| (w.to_string(), f))
        .collect();

        Self {
            negation_window: 3,
            negation_scalar: -0.74,
            negations: words(&[
                "not", "n't", "no", "never", "none", "nobody", "nothing", "neither", "nowhere",
                "hardly", "rarely", "scarcely",
            ]),
            boosters,
            exclamation_cap: 3,
            exclamation_weight: 0.08,
            question_cap: 2,
            question_weight: 0.03,
        }
    }
}
