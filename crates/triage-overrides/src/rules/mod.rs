//! Override rule types.
//!
//! Each variant of [`OverrideRule`] is an independent predicate producing at
//! most one [`OverrideVerdict`]; the engine owns the ordering.

pub mod clause;
pub mod keyword;
pub mod pattern;
pub mod sentence;

use triage_core::{OverrideVerdict, Severity};

use crate::context::ScanContext;

/// Fields shared by every rule.
#[derive(Clone, Debug)]
pub struct RuleBase {
    /// Unique identifier (e.g. `weapon.keywords`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Severity of the verdict this rule issues.
    pub severity: Severity,
    /// Higher priority rules are evaluated first.
    pub priority: i32,
    /// Disabled rules are skipped.
    pub enabled: bool,
    /// Tags attached to the verdict.
    pub tags: Vec<String>,
}

impl RuleBase {
    /// Verdict with this rule's severity and tags.
    pub fn verdict(&self, reason: impl Into<String>) -> OverrideVerdict {
        OverrideVerdict::new(self.severity, self.tags.iter().cloned(), reason)
    }
}

/// Outcome of one rule against one text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleEvaluation {
    /// Rule that ran.
    pub rule_id: String,
    /// Verdict when the rule fired.
    pub verdict: Option<OverrideVerdict>,
}

impl RuleEvaluation {
    /// The rule fired.
    pub fn triggered(rule_id: impl Into<String>, verdict: OverrideVerdict) -> Self {
        Self {
            rule_id: rule_id.into(),
            verdict: Some(verdict),
        }
    }

    /// The rule did not fire.
    pub fn not_triggered(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            verdict: None,
        }
    }

    /// Whether the rule fired.
    pub fn is_triggered(&self) -> bool {
        self.verdict.is_some()
    }
}

/// Union of all override rule types.
pub enum OverrideRule {
    /// Any keyword from a table anywhere in the text.
    Keyword(keyword::KeywordRule),
    /// Context in one sentence, behavior in a different one.
    CrossSentence(sentence::CrossSentenceRule),
    /// Sentences scanned in order against ordered incident checks.
    PerSentence(sentence::PerSentenceRule),
    /// Clauses around a contrast conjunction.
    ContrastClause(clause::ContrastClauseRule),
    /// Positional word plus behavior plus context anywhere in the text.
    Positional(pattern::PositionalRule),
}

impl OverrideRule {
    /// Common base fields.
    pub fn base(&self) -> &RuleBase {
        match self {
            Self::Keyword(r) => &r.base,
            Self::CrossSentence(r) => &r.base,
            Self::PerSentence(r) => &r.base,
            Self::ContrastClause(r) => &r.base,
            Self::Positional(r) => &r.base,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut RuleBase {
        match self {
            Self::Keyword(r) => &mut r.base,
            Self::CrossSentence(r) => &mut r.base,
            Self::PerSentence(r) => &mut r.base,
            Self::ContrastClause(r) => &mut r.base,
            Self::Positional(r) => &mut r.base,
        }
    }

    /// Evaluate against a scan context.
    pub fn evaluate(&self, ctx: &ScanContext) -> RuleEvaluation {
        let verdict = match self {
            Self::Keyword(r) => r.evaluate(ctx),
            Self::CrossSentence(r) => r.evaluate(ctx),
            Self::PerSentence(r) => r.evaluate(ctx),
            Self::ContrastClause(r) => r.evaluate(ctx),
            Self::Positional(r) => r.evaluate(ctx),
        };
        let id = self.base().id.clone();
        match verdict {
            Some(v) => RuleEvaluation::triggered(id, v),
            None => RuleEvaluation::not_triggered(id),
        }
    }
}

impl std::fmt::Debug for OverrideRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Keyword(_) => "Keyword",
            Self::CrossSentence(_) => "CrossSentence",
            Self::PerSentence(_) => "PerSentence",
            Self::ContrastClause(_) => "ContrastClause",
            Self::Positional(_) => "Positional",
        };
        f.debug_tuple(kind).field(&self.base().id).finish()
    }
}
