//! # triage-settings
//!
//! Layered configuration for the triage pipeline.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TriageSettings::default()`]
//! 2. **User file**: `~/.triage/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TRIAGE_*` overrides
//!
//! Every keyword list, booster, emotion marker and threshold the pipeline
//! uses lives here as data. The loaded value is handed to constructors
//! explicitly; there is no process-wide instance.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path, triage_home};
pub use types::*;
