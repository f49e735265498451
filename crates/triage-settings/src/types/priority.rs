//! Priority scoring keyword lists, weights and tier thresholds.

use serde::{Deserialize, Serialize};

use super::words;

/// Priority scorer configuration. Keyword entries match whole words; a
/// trailing `*` marks a stem.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrioritySettings {
    /// Any hit short-circuits to `critical` with score 1.0.
    pub severe_keywords: Vec<String>,
    /// Anger or frustration markers.
    pub anger_keywords: Vec<String>,
    /// Urgency markers, weighted per hit.
    pub urgent_keywords: Vec<String>,
    /// Emotion name that counts as an anger signal.
    pub anger_emotion: String,
    /// Compound at or below this is very negative.
    pub very_negative_compound: f64,
    /// Compound at or below this is moderately negative.
    pub moderately_negative_compound: f64,
    /// Compound strictly below this is slightly negative.
    pub slightly_negative_compound: f64,
    /// Contribution of a very negative compound.
    pub very_negative_weight: f64,
    /// Contribution of a moderately negative compound.
    pub moderately_negative_weight: f64,
    /// Contribution of a slightly negative compound.
    pub slightly_negative_weight: f64,
    /// Flat contribution of any anger signal.
    pub anger_weight: f64,
    /// Contribution per urgency keyword hit.
    pub urgency_weight: f64,
    /// Cap on the total urgency contribution.
    pub urgency_cap: f64,
    /// Score at or above this is `critical`.
    pub critical_threshold: f64,
    /// Score at or above this is `high`.
    pub high_threshold: f64,
    /// Multiplier for `normal` suggestion/recommendation scores.
    pub suggestion_dampening: f64,
}

impl Default for PrioritySettings {
    fn default() -> Self {
        Self {
            severe_keywords: words(&[
                "weapon",
                "gun",
                "knife",
                "bomb",
                "shoot",
                "stab",
                "stabbed",
                "attack",
                "threat",
                "threatening",
                "will hurt",
                "going to kill",
                "stole",
                "stolen",
                "theft",
                "rob",
                "robbery",
                "hacked",
                "hack",
                "security breach",
                "compromise*",
                "account compromised",
            ]),
            anger_keywords: words(&[
                "angry",
                "furious",
                "enraged",
                "hate",
                "disgusted",
                "frustrated",
                "annoyed",
                "irritated",
                "pissed",
                "mad",
                "livid",
                "outraged",
            ]),
            urgent_keywords: words(&[
                "critical",
                "emergency",
                "urgent",
                "asap",
                "immediately",
                "broken",
                "down",
                "not working",
                "crash*",
                "fail",
                "failed",
                "unable",
                "cannot",
                "help",
                "help!",
                "dying",
                "disaster",
                "catastrophe",
                "worst",
                "terrible",
            ]),
            anger_emotion: "anger".to_string(),
            very_negative_compound: -0.7,
            moderately_negative_compound: -0.3,
            slightly_negative_compound: -0.05,
            very_negative_weight: 0.4,
            moderately_negative_weight: 0.25,
            slightly_negative_weight: 0.1,
            anger_weight: 0.35,
            urgency_weight: 0.10,
            urgency_cap: 0.25,
            critical_threshold: 0.7,
            high_threshold: 0.4,
            suggestion_dampening: 0.5,
        }
    }
}
