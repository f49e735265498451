//! Verdicts produced by the override detector, the tone summarizer and the
//! priority scorer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Override severity
// ─────────────────────────────────────────────────────────────────────────────

/// Severity tier assigned by the contextual override detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Mild concern.
    Low,
    /// Behavioral issue (disruption, bullying, rule breaking).
    Medium,
    /// Safety issue (emergency, weapon, fighting, theft).
    High,
}

impl Severity {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forced negative override for text carrying a non-lexical danger signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideVerdict {
    /// Severity tier.
    pub severity: Severity,
    /// Signal tags such as `weapon` or `teacher_context`.
    pub tags: BTreeSet<String>,
    /// Human-readable explanation of the matching rule.
    pub reason: String,
}

impl OverrideVerdict {
    /// Build a verdict from tag names.
    pub fn new<I, S>(severity: Severity, tags: I, reason: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            severity,
            tags: tags.into_iter().map(Into::into).collect(),
            reason: reason.into(),
        }
    }

    /// Whether the verdict carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intensity
// ─────────────────────────────────────────────────────────────────────────────

/// Intensity bucket for the magnitude of a compound score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Compound is exactly zero (priority verdicts only).
    Neutral,
    /// Below the moderate threshold.
    Mildly,
    /// At or above the moderate threshold.
    Moderately,
    /// At or above the strong threshold.
    Very,
    /// Severe keyword short-circuit (priority verdicts only).
    Severe,
}

impl Intensity {
    /// Tone intensity: `very` at `strong`, `moderately` at `moderate`,
    /// otherwise `mildly`.
    pub fn from_compound(compound: f64, strong: f64, moderate: f64) -> Self {
        let magnitude = compound.abs();
        if magnitude >= strong {
            Self::Very
        } else if magnitude >= moderate {
            Self::Moderately
        } else {
            Self::Mildly
        }
    }

    /// Priority intensity: like [`Intensity::from_compound`] but `neutral`
    /// when the compound is exactly zero.
    pub fn for_priority(compound: f64, strong: f64, moderate: f64) -> Self {
        if compound == 0.0 {
            Self::Neutral
        } else {
            Self::from_compound(compound, strong, moderate)
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Mildly => "mildly",
            Self::Moderately => "moderately",
            Self::Very => "very",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tone
// ─────────────────────────────────────────────────────────────────────────────

/// A strongly weighted word and the magnitude of its adjusted valence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrongWord {
    /// Surface form.
    pub word: String,
    /// `|adjustedValence|`.
    pub weight: f64,
}

/// Tone and emotion summary of a whole text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneContext {
    /// `neutral` or `{intensity} positive|negative`.
    pub tone_label: String,
    /// Whole-text compound from the base polarity scorer.
    pub compound: f64,
    /// Intensity bucket of `compound`.
    pub intensity: Intensity,
    /// Emotion with the highest non-zero accumulated weight.
    pub main_emotion: Option<String>,
    /// Accumulated weight per emotion category.
    pub emotion_scores: BTreeMap<String, f64>,
    /// Top-K words by `|adjustedValence|`, strongest first.
    pub strong_words: Vec<StrongWord>,
    /// Distinct nearest-noun targets of the strong words.
    pub main_targets: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Priority
// ─────────────────────────────────────────────────────────────────────────────

/// Final triage tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Regular queue.
    Normal,
    /// Needs attention soon.
    High,
    /// Needs attention now.
    Critical,
}

impl Priority {
    /// All tiers, most urgent first.
    pub const ALL: [Self; 3] = [Self::Critical, Self::High, Self::Normal];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// The terminal triage artifact for one message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityVerdict {
    /// Tier derived from `priority_score`.
    pub priority: Priority,
    /// Blended score in `[0, 1]`.
    pub priority_score: f64,
    /// Dominant emotion from the tone summary.
    pub emotion: Option<String>,
    /// Original whole-text compound (never replaced by an override).
    pub compound: f64,
    /// Intensity label.
    pub intensity: Intensity,
    /// Any urgency or anger signal (always set on severe short-circuit).
    pub urgency_flagged: bool,
    /// Keywords that fired.
    pub flagged_keywords: BTreeSet<String>,
    /// Fired contributions joined with ` | `.
    pub reason: String,
    /// Contextual override, kept for audit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_override: Option<OverrideVerdict>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_intensity_buckets() {
        assert_eq!(Intensity::from_compound(0.6, 0.6, 0.25), Intensity::Very);
        assert_eq!(Intensity::from_compound(-0.59, 0.6, 0.25), Intensity::Moderately);
        assert_eq!(Intensity::from_compound(0.25, 0.6, 0.25), Intensity::Moderately);
        assert_eq!(Intensity::from_compound(0.1, 0.6, 0.25), Intensity::Mildly);
        assert_eq!(Intensity::from_compound(0.0, 0.6, 0.25), Intensity::Mildly);
    }

    #[test]
    fn priority_intensity_is_neutral_only_at_zero() {
        assert_eq!(Intensity::for_priority(0.0, 0.6, 0.25), Intensity::Neutral);
        assert_eq!(Intensity::for_priority(0.01, 0.6, 0.25), Intensity::Mildly);
        assert_eq!(Intensity::for_priority(-0.9, 0.6, 0.25), Intensity::Very);
    }

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn priority_parse_and_display() {
        for p in Priority::ALL {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn override_tags_are_sorted_and_unique() {
        let v = OverrideVerdict::new(
            Severity::Medium,
            ["teacher_context", "disruption", "disruption"],
            "x",
        );
        let tags: Vec<&str> = v.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, ["disruption", "teacher_context"]);
        assert!(v.has_tag("disruption"));
    }

    #[test]
    fn verdict_omits_absent_override() {
        let v = PriorityVerdict {
            priority: Priority::Normal,
            priority_score: 0.0,
            emotion: None,
            compound: 0.0,
            intensity: Intensity::Neutral,
            urgency_flagged: false,
            flagged_keywords: BTreeSet::new(),
            reason: "Neutral sentiment".into(),
            context_override: None,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("contextOverride").is_none());
        assert_eq!(json["priorityScore"], 0.0);
        assert_eq!(json["intensity"], "neutral");
    }
}
