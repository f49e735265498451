//! Contextual override keyword groups.

use serde::{Deserialize, Serialize};
use triage_core::Severity;

use super::words;

/// A value per override severity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityValues {
    /// Value for `low`.
    pub low: f64,
    /// Value for `medium`.
    pub medium: f64,
    /// Value for `high`.
    pub high: f64,
}

impl SeverityValues {
    /// Value for the given severity.
    pub fn get(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

impl Default for SeverityValues {
    fn default() -> Self {
        Self {
            low: -0.30,
            medium: -0.60,
            high: -0.90,
        }
    }
}

/// Keyword groups scanned by the override rules. Entries match whole words;
/// a trailing `*` marks a stem.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideKeywords {
    /// Teacher or classroom context.
    pub teacher: Vec<String>,
    /// Disruptive behavior.
    pub disruptive: Vec<String>,
    /// Physical altercation.
    pub fighting: Vec<String>,
    /// Theft.
    pub theft: Vec<String>,
    /// Rule breaking.
    pub rule_breaking: Vec<String>,
    /// Emergencies.
    pub emergency: Vec<String>,
    /// Bullying and harassment.
    pub bullying: Vec<String>,
    /// Weapons.
    pub weapon: Vec<String>,
}

impl Default for OverrideKeywords {
    fn default() -> Self {
        Self {
            teacher: words(&[
                "teacher", "professor", "instructor", "lecturer", "class", "classroom", "lecture",
                "teaching", "speaking", "presenting",
            ]),
            disruptive: words(&[
                "play", "playing", "shout", "shouting", "talk", "talking", "laugh", "laughing",
                "whisper", "phone", "text", "texting", "distract", "distracting", "noisy", "noise",
                "messing", "mess",
            ]),
            fighting: words(&[
                "fight", "fighting", "fights", "punch", "punching", "hit", "hits", "assault",
                "brawl", "scuffle", "attack", "beat", "beating", "stab", "stabbing", "kick",
                "kicked",
            ]),
            theft: words(&[
                "steal", "stole", "stealing", "theft", "rob", "robbed", "robbery", "thief",
            ]),
            rule_breaking: words(&[
                "cheat",
                "cheating",
                "vandal*",
                "break the rule",
                "break rules",
                "skip class",
                "skip school",
                "trespass",
                "graffiti",
            ]),
            emergency: words(&[
                "fire",
                "help",
                "help!",
                "injur*",
                "bleed*",
                "collapsed",
                "unconscious",
                "choking",
                "ambulance",
                "hurt",
                "medical",
                "scream",
                "screaming",
            ]),
            bullying: words(&[
                "bully",
                "bullying",
                "harass*",
                "insult",
                "abuse",
                "abusive",
                "taunt",
                "taunting",
            ]),
            weapon: words(&[
                "gun", "knife", "weapon", "firearm", "bomb", "shoot", "shooting", "blade",
            ]),
        }
    }
}

/// Override detector configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideSettings {
    /// Keyword groups.
    pub keywords: OverrideKeywords,
    /// Words that split a sentence into contrasting clauses, tried in order.
    pub contrast_conjunctions: Vec<String>,
    /// Positional words for the positional disruption rule.
    pub positional_terms: Vec<String>,
    /// Compound shown in place of the measured one when an override fires.
    pub adjusted_compound: SeverityValues,
}

impl Default for OverrideSettings {
    fn default() -> Self {
        Self {
            keywords: OverrideKeywords::default(),
            contrast_conjunctions: words(&["while", "when", "as", "whilst"]),
            positional_terms: words(&["back", "rear", "front", "middle", "behind", "near"]),
            adjusted_compound: SeverityValues::default(),
        }
    }
}
