//! # triage-overrides
//!
//! Contextual override detection: a keyword and pattern rule engine that
//! catches safety-critical language a sentiment score under-weights (a
//! calmly phrased account of a fight, a weapon mention, an emergency).
//!
//! Rules are evaluated in descending priority and the **first match wins**:
//!
//! | priority | rule | severity |
//! |---------:|------|----------|
//! | 700 | `emergency.keywords` | high |
//! | 600 | `weapon.keywords` | high |
//! | 500 | `classroom.cross-sentence` | medium |
//! | 400 | `incident.per-sentence` | high / medium |
//! | 300 | `classroom.contrast-clause` | medium / high |
//! | 200 | `classroom.positional` | medium |
//! | 100 | `fighting.fallback` | high |

#![deny(unsafe_code)]

pub mod context;
pub mod default_rules;
pub mod engine;
pub mod errors;
pub mod rules;

pub use context::ScanContext;
pub use default_rules::{DEFAULT_RULE_IDS, default_rules};
pub use engine::OverrideEngine;
pub use errors::OverrideError;
pub use rules::{OverrideRule, RuleBase, RuleEvaluation};
