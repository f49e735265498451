//! # triage-scoring
//!
//! The scoring half of the triage pipeline:
//!
//! - [`StructureScorer`]: per-word lexicon valence with booster, negation
//!   and punctuation adjustments
//! - [`ToneSummarizer`]: tone label, dominant emotion, strongest words and
//!   their targets
//! - [`TextSummarizer`]: the human-readable summary
//! - [`PriorityScorer`]: keyword, emotion, sentiment and override signals
//!   folded into a tiered [`PriorityVerdict`](triage_core::PriorityVerdict)
//! - [`Analyzer`]: builds all of the above (plus the override engine) from
//!   one [`TriageSettings`](triage_settings::TriageSettings) value
//!
//! Every scoring call is total; only construction returns errors.

#![deny(unsafe_code)]

pub mod analyzer;
pub mod errors;
pub mod priority;
pub mod structure;
pub mod summary;
pub mod tone;

pub use analyzer::{AnalysisMode, AnalysisReport, Analyzer, OverallSentiment, ReportContext, Segment};
pub use errors::AnalyzerError;
pub use priority::{PriorityScorer, PrioritySignals};
pub use structure::StructureScorer;
pub use summary::TextSummarizer;
pub use tone::ToneSummarizer;
