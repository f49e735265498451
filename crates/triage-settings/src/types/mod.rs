//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]`. Each type implements
//! [`Default`] with the production tables; `#[serde(default)]` lets a user
//! file override any subset of fields.

mod overrides;
mod priority;
mod scoring;
mod tone;

pub use overrides::*;
pub use priority::*;
pub use scoring::*;
pub use tone::*;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

pub(crate) fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

/// Root settings type for the triage pipeline.
///
/// ```json
/// {
///   "tone": { "topK": 5 },
///   "priority": { "urgentKeywords": ["outage", "down"] }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageSettings {
    /// Structure scorer tables.
    pub scoring: ScoringSettings,
    /// Tone labelling and emotion table.
    pub tone: ToneSettings,
    /// Contextual override keyword groups.
    pub overrides: OverrideSettings,
    /// Priority keyword lists, weights and thresholds.
    pub priority: PrioritySettings,
    /// Text summary limits.
    pub summary: SummarySettings,
    /// Tokenizer and lexicon resources.
    pub text: TextSettings,
    /// Ticket database.
    pub store: StoreSettings,
    /// Logging output.
    pub logging: LoggingSettings,
}

impl TriageSettings {
    /// Reject thresholds that contradict each other.
    pub fn validate(&self) -> Result<()> {
        let p = &self.priority;
        if !(0.0..=1.0).contains(&p.high_threshold) || !(0.0..=1.0).contains(&p.critical_threshold)
        {
            return Err(invalid("priority tier thresholds must lie within [0, 1]"));
        }
        if p.high_threshold > p.critical_threshold {
            return Err(invalid(
                "priority.highThreshold must not exceed priority.criticalThreshold",
            ));
        }
        if !(p.very_negative_compound <= p.moderately_negative_compound
            && p.moderately_negative_compound <= p.slightly_negative_compound)
        {
            return Err(invalid("priority compound bands must be ordered very <= moderately <= slightly"));
        }
        if !(0.0..=1.0).contains(&p.suggestion_dampening) {
            return Err(invalid("priority.suggestionDampening must lie within [0, 1]"));
        }

        let t = &self.tone;
        if t.moderate_threshold > t.strong_threshold {
            return Err(invalid(
                "tone.moderateThreshold must not exceed tone.strongThreshold",
            ));
        }
        if t.top_k == 0 {
            return Err(invalid("tone.topK must be at least 1"));
        }
        if t.emotions.iter().any(|e| e.name.trim().is_empty()) {
            return Err(invalid("tone.emotions entries need a name"));
        }

        if self.scoring.negation_window == 0 {
            return Err(invalid("scoring.negationWindow must be at least 1"));
        }
        if self.summary.sentences_limit == 0 {
            return Err(invalid("summary.sentencesLimit must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SettingsError {
    SettingsError::InvalidValue(msg.to_string())
}

/// Text summary limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarySettings {
    /// Sentences described before the rest are omitted.
    pub sentences_limit: usize,
    /// Key words listed per sentence.
    pub key_words_per_sentence: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            sentences_limit: 5,
            key_words_per_sentence: 2,
        }
    }
}

/// Which word tokenizer to prefer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Clitic-splitting tokenizer with regex fallback.
    #[default]
    Treebank,
    /// Regex rule only.
    Regex,
}

impl std::str::FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "treebank" => Ok(Self::Treebank),
            "regex" => Ok(Self::Regex),
            other => Err(format!("unknown tokenizer: {other}")),
        }
    }
}

/// Tokenizer and lexicon resources.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSettings {
    /// Preferred tokenizer.
    pub tokenizer: TokenizerKind,
    /// Lexicon file replacing the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<String>,
}

/// Ticket database location.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Database file; defaults to `~/.triage/tickets.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

impl StoreSettings {
    /// Configured database path or the default under the triage home.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .as_ref()
            .map_or_else(|| crate::loader::triage_home().join("tickets.db"), PathBuf::from)
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
