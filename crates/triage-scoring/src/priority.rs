//! Priority composition.
//!
//! Severe keywords short-circuit to `critical`. Otherwise the score is the
//! sum of the anger, urgency and sentiment-band contributions, capped at 1.0
//! and mapped to a tier. A context override rides along on the verdict but
//! never moves the score.

use std::collections::BTreeSet;

use tracing::debug;
use triage_core::{Intensity, OverrideVerdict, Priority, PriorityVerdict};
use triage_settings::{PrioritySettings, ToneSettings};
use triage_text::KeywordSet;

/// Signals the priority scorer combines.
#[derive(Clone, Copy, Debug)]
pub struct PrioritySignals<'a> {
    /// Raw ticket text, scanned for keywords.
    pub text: &'a str,
    /// Whole-text base compound.
    pub compound: f64,
    /// Dominant emotion from the tone summary.
    pub emotion: Option<&'a str>,
    /// Contextual override, when one fired. Recorded, not scored.
    pub context_override: Option<&'a OverrideVerdict>,
}

/// Turns signals into a [`PriorityVerdict`].
#[derive(Debug)]
pub struct PriorityScorer {
    severe: KeywordSet,
    anger: KeywordSet,
    urgent: KeywordSet,
    settings: PrioritySettings,
    strong_threshold: f64,
    moderate_threshold: f64,
}

impl PriorityScorer {
    /// Compile keyword tables. Intensity thresholds come from the tone
    /// settings so both summaries bucket alike.
    pub fn new(settings: PrioritySettings, tone: &ToneSettings) -> Result<Self, regex::Error> {
        Ok(Self {
            severe: KeywordSet::new(&settings.severe_keywords)?,
            anger: KeywordSet::new(&settings.anger_keywords)?,
            urgent: KeywordSet::new(&settings.urgent_keywords)?,
            settings,
            strong_threshold: tone.strong_threshold,
            moderate_threshold: tone.moderate_threshold,
        })
    }

    /// Tier for a score.
    pub fn tier(&self, score: f64) -> Priority {
        if score >= self.settings.critical_threshold {
            Priority::Critical
        } else if score >= self.settings.high_threshold {
            Priority::High
        } else {
            Priority::Normal
        }
    }

    fn sentiment_contribution(&self, compound: f64) -> Option<(f64, String)> {
        let s = &self.settings;
        if compound <= s.very_negative_compound {
            Some((
                s.very_negative_weight,
                format!("Very negative sentiment ({compound:.2})"),
            ))
        } else if compound <= s.moderately_negative_compound {
            Some((
                s.moderately_negative_weight,
                format!("Moderately negative sentiment ({compound:.2})"),
            ))
        } else if compound < s.slightly_negative_compound {
            Some((
                s.slightly_negative_weight,
                format!("Slightly negative sentiment ({compound:.2})"),
            ))
        } else {
            None
        }
    }

    /// Compose a verdict.
    pub fn score(&self, signals: &PrioritySignals<'_>) -> PriorityVerdict {
        let s = &self.settings;
        let emotion = signals.emotion.map(String::from);
        let context_override = signals.context_override.cloned();

        let severe_hits = self.severe.matches(signals.text);
        if !severe_hits.is_empty() {
            debug!(keywords = ?severe_hits, "Severe keyword short-circuit");
            return PriorityVerdict {
                priority: Priority::Critical,
                priority_score: 1.0,
                emotion,
                compound: signals.compound,
                intensity: Intensity::Severe,
                urgency_flagged: true,
                reason: format!("Severe keywords detected: {}", severe_hits.join(", ")),
                flagged_keywords: severe_hits.into_iter().map(String::from).collect(),
                context_override,
            };
        }

        let anger_hits = self.anger.matches(signals.text);
        let urgent_hits = self.urgent.matches(signals.text);
        let angry = !anger_hits.is_empty() || signals.emotion == Some(s.anger_emotion.as_str());

        let mut score = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        if angry {
            score += s.anger_weight;
            reasons.push(format!(
                "Angry/frustrated (emotion: {})",
                signals.emotion.unwrap_or("none")
            ));
        }
        if !urgent_hits.is_empty() {
            score += (s.urgency_weight * urgent_hits.len() as f64).min(s.urgency_cap);
            reasons.push(format!("Urgent keywords: {}", urgent_hits.join(", ")));
        }
        if let Some((weight, reason)) = self.sentiment_contribution(signals.compound) {
            score += weight;
            reasons.push(reason);
        }

        let priority_score = score.clamp(0.0, 1.0);
        let priority = self.tier(priority_score);
        debug!(%priority, priority_score, "Priority scored");

        let flagged_keywords: BTreeSet<String> = anger_hits
            .iter()
            .chain(&urgent_hits)
            .map(|k| (*k).to_string())
            .collect();

        PriorityVerdict {
            priority,
            priority_score,
            emotion,
            compound: signals.compound,
            intensity: Intensity::for_priority(
                signals.compound,
                self.strong_threshold,
                self.moderate_threshold,
            ),
            urgency_flagged: angry || !urgent_hits.is_empty(),
            flagged_keywords,
            reason: if reasons.is_empty() {
                "Neutral sentiment".to_string()
            } else {
                reasons.join(" | ")
            },
            context_override,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
