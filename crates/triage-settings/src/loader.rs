//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TriageSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply `TRIAGE_*` environment variable overrides
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{TokenizerKind, TriageSettings};

/// Directory holding the settings file and the default database.
pub fn triage_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".triage")
}

/// Resolve the path to the settings file (`~/.triage/settings.json`).
pub fn settings_path() -> PathBuf {
    triage_home().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TriageSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON or inconsistent values are
/// errors.
pub fn load_settings_from_path(path: &Path) -> Result<TriageSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn load_file_layer(path: &Path) -> Result<TriageSettings> {
    let defaults = serde_json::to_value(TriageSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TRIAGE_*` environment variable overrides.
///
/// Invalid values are logged and ignored.
pub fn apply_env_overrides(settings: &mut TriageSettings) {
    if let Some(v) = read_env_string("TRIAGE_DB_PATH") {
        settings.store.db_path = Some(v);
    }
    if let Some(v) = read_env_string("TRIAGE_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read_env_string("TRIAGE_LEXICON_PATH") {
        settings.text.lexicon_path = Some(v);
    }
    if let Some(v) = read_env_string("TRIAGE_TOKENIZER") {
        match v.parse::<TokenizerKind>() {
            Ok(kind) => settings.text.tokenizer = kind,
            Err(e) => warn!(key = "TRIAGE_TOKENIZER", value = %v, error = %e, "invalid env var, ignoring"),
        }
    }
    if let Some(v) = read_env_usize("TRIAGE_NEGATION_WINDOW", 1, 10) {
        settings.scoring.negation_window = v;
    }
    if let Some(v) = read_env_usize("TRIAGE_TOP_K", 1, 50) {
        settings.tone.top_k = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `usize` within an inclusive range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers ─────────────────────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::errors::SettingsError;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"tone": {"topK": 3, "strongThreshold": 0.6}});
        let source = serde_json::json!({"tone": {"topK": 5}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["tone"]["topK"], 5);
        assert_eq!(merged["tone"]["strongThreshold"], 0.6);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"list": ["a", "b", "c"]});
        let source = serde_json::json!({"list": ["z"]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["list"], serde_json::json!(["z"]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"a": null});
        assert_eq!(deep_merge(target, source)["a"], 1);
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"b": 1}});
        let source = serde_json::json!({"a": 7});
        assert_eq!(deep_merge(target, source)["a"], 7);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_file_layer(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.tone.top_k, 3);
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"overrides": {"adjustedCompound": {"high": -0.8}}, "priority": {"urgentKeywords": ["outage"]}}"#,
        )
        .unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.priority.urgent_keywords, vec!["outage".to_string()]);
        assert!((settings.overrides.adjusted_compound.high + 0.8).abs() < f64::EPSILON);
        // sibling keys survive the per-key merge
        assert!((settings.overrides.adjusted_compound.medium + 0.6).abs() < f64::EPSILON);
        assert!(!settings.priority.severe_keywords.is_empty());
    }

    #[test]
    fn boosters_merge_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"scoring": {"boosters": {"super": 1.6}}}"#).unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.scoring.boosters.get("super"), Some(&1.6));
        assert_eq!(settings.scoring.boosters.get("very"), Some(&1.5));
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_matches!(load_settings_from_path(&path), Err(SettingsError::Json(_)));
    }

    #[test]
    fn load_inconsistent_thresholds_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"priority": {"highThreshold": 0.9}}"#).unwrap();
        assert_matches!(
            load_settings_from_path(&path),
            Err(SettingsError::InvalidValue(_))
        );
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_usize_valid_and_out_of_range() {
        assert_eq!(parse_usize_range("3", 1, 10), Some(3));
        assert_eq!(parse_usize_range(" 10 ", 1, 10), Some(10));
        assert_eq!(parse_usize_range("0", 1, 10), None);
        assert_eq!(parse_usize_range("11", 1, 10), None);
        assert_eq!(parse_usize_range("three", 1, 10), None);
    }

    #[test]
    fn settings_path_is_under_triage_home() {
        let p = settings_path();
        assert!(p.ends_with(".triage/settings.json"));
    }
}
