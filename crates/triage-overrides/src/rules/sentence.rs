//! Sentence-level rules.

use triage_core::{OverrideVerdict, Severity};
use triage_text::KeywordSet;

use super::RuleBase;
use crate::context::ScanContext;

/// Fires when one sentence carries `context` keywords and a different
/// sentence carries `behavior` keywords.
#[derive(Debug)]
pub struct CrossSentenceRule {
    /// Common rule fields.
    pub base: RuleBase,
    /// Context keywords (e.g. teacher, class).
    pub context: KeywordSet,
    /// Behavior keywords (e.g. talking, phone).
    pub behavior: KeywordSet,
}

impl CrossSentenceRule {
    /// Evaluate against sentence pairs `(i, j)`, `i != j`, in order.
    pub fn evaluate(&self, ctx: &ScanContext) -> Option<OverrideVerdict> {
        for (i, anchor) in ctx.sentences.iter().enumerate() {
            if !self.context.is_match(&anchor.raw) {
                continue;
            }
            for (j, other) in ctx.sentences.iter().enumerate() {
                if i != j && self.behavior.is_match(&other.raw) {
                    return Some(self.base.verdict(format!(
                        "Teacher context (sentence {}) and disruptive behavior (sentence {}): \"{}\"",
                        i + 1,
                        j + 1,
                        other.raw
                    )));
                }
            }
        }
        None
    }
}

/// One incident category checked against each sentence.
#[derive(Debug)]
pub struct SentenceCheck {
    /// Tag placed on the verdict.
    pub tag: String,
    /// Severity of the verdict.
    pub severity: Severity,
    /// Reason text ahead of the sentence number (e.g. `Theft-related
    /// activity mentioned`).
    pub reason_prefix: String,
    /// Keyword table.
    pub keywords: KeywordSet,
}

/// Scans sentences in order; within a sentence the checks run in order and
/// the first hit wins.
#[derive(Debug)]
pub struct PerSentenceRule {
    /// Common rule fields. Severity and tags come from the matching check.
    pub base: RuleBase,
    /// Ordered checks.
    pub checks: Vec<SentenceCheck>,
}

impl PerSentenceRule {
    /// Evaluate sentence by sentence.
    pub fn evaluate(&self, ctx: &ScanContext) -> Option<OverrideVerdict> {
        ctx.sentences.iter().enumerate().find_map(|(i, sentence)| {
            let check = self
                .checks
                .iter()
                .find(|c| c.keywords.is_match(&sentence.raw))?;
            Some(OverrideVerdict::new(
                check.severity,
                [check.tag.as_str()],
                format!(
                    "{} in sentence {}: \"{}\"",
                    check.reason_prefix,
                    i + 1,
                    sentence.raw
                ),
            ))
        })
    }
}
