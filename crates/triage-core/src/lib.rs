//! # triage-core
//!
//! Shared vocabulary for the ticket triage pipeline.
//!
//! Every other crate in the workspace depends on this one:
//!
//! - **Per-word accounting**: [`Token`], [`WordContribution`], [`SentenceAnalysis`]
//! - **Black-box polarity**: [`PolarityScores`] and the [`SentimentLabel`] buckets
//! - **Verdicts**: [`OverrideVerdict`] (contextual safety override),
//!   [`ToneContext`] (tone/emotion summary), [`PriorityVerdict`] (final triage)
//! - **Logging**: `tracing` subscriber setup and log capture for tests
//!
//! All verdict types are immutable values; they serialize with `camelCase`
//! field names.

#![deny(unsafe_code)]

pub mod analysis;
pub mod logging;
pub mod text;
pub mod verdict;

pub use analysis::{PolarityScores, SentenceAnalysis, SentimentLabel, Token, WordContribution};
pub use verdict::{
    Intensity, OverrideVerdict, Priority, PriorityVerdict, Severity, StrongWord, ToneContext,
};
