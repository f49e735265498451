//! Override evaluation engine.
//!
//! Holds registered rules in descending priority and returns the verdict of
//! the first enabled rule that fires.

use tracing::debug;
use triage_core::OverrideVerdict;
use triage_settings::OverrideSettings;

use crate::context::ScanContext;
use crate::default_rules::default_rules;
use crate::errors::OverrideError;
use crate::rules::{OverrideRule, RuleEvaluation};

/// Ordered set of override rules.
pub struct OverrideEngine {
    rules: Vec<OverrideRule>,
}

impl OverrideEngine {
    /// Engine over the given rules.
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        let mut engine = Self { rules: Vec::new() };
        for rule in rules {
            engine.register_rule(rule);
        }
        engine
    }

    /// Engine with the built-in rules built from settings.
    pub fn from_settings(settings: &OverrideSettings) -> Result<Self, OverrideError> {
        let engine = Self::new(default_rules(settings)?);
        debug!(rule_count = engine.rules.len(), "OverrideEngine initialized");
        Ok(engine)
    }

    /// Register a rule, replacing any rule with the same ID.
    ///
    /// Rules with equal priority keep registration order.
    pub fn register_rule(&mut self, rule: OverrideRule) {
        let base = rule.base();
        debug!(rule_id = %base.id, priority = base.priority, "Rule registered");
        let id = base.id.clone();
        let _ = self.unregister_rule(&id);
        let priority = rule.base().priority;
        let pos = self
            .rules
            .iter()
            .position(|r| r.base().priority < priority)
            .unwrap_or(self.rules.len());
        self.rules.insert(pos, rule);
    }

    /// Unregister a rule by ID. Returns `true` if it was present.
    pub fn unregister_rule(&mut self, rule_id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.base().id != rule_id);
        self.rules.len() != before
    }

    /// Get a rule by ID.
    pub fn get_rule(&self, rule_id: &str) -> Option<&OverrideRule> {
        self.rules.iter().find(|r| r.base().id == rule_id)
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Enable or disable a rule. Returns `false` if the rule is unknown.
    pub fn set_enabled(&mut self, rule_id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.base().id == rule_id) {
            Some(rule) => {
                rule.base_mut().enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// First verdict from an enabled rule, or `None`.
    pub fn detect(&self, text: &str) -> Option<OverrideVerdict> {
        let ctx = ScanContext::new(text);
        self.rules
            .iter()
            .filter(|r| r.base().enabled)
            .find_map(|rule| {
                let verdict = rule.evaluate(&ctx).verdict?;
                debug!(
                    rule_id = %rule.base().id,
                    severity = %verdict.severity,
                    "Context override matched"
                );
                Some(verdict)
            })
    }

    /// Evaluate every enabled rule without stopping at the first match.
    pub fn evaluate_all(&self, text: &str) -> Vec<RuleEvaluation> {
        let ctx = ScanContext::new(text);
        self.rules
            .iter()
            .filter(|r| r.base().enabled)
            .map(|r| r.evaluate(&ctx))
            .collect()
    }
}

impl std::fmt::Debug for OverrideEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.rules.iter().map(|r| r.base().id.as_str()).collect();
        f.debug_struct("OverrideEngine").field("rules", &ids).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
