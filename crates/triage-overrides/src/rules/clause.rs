//! Contrast clause rule: "while the teacher is speaking, they are playing".

use triage_core::{OverrideVerdict, Severity};
use triage_text::KeywordSet;

use super::RuleBase;
use crate::context::ScanContext;

/// Splits each sentence at the first occurrence of a contrast conjunction
/// and compares the two clauses.
///
/// Context in one clause and behavior in the other issues the base verdict;
/// otherwise fighting in either clause issues a `fighting` verdict.
#[derive(Debug)]
pub struct ContrastClauseRule {
    /// Common rule fields (context/behavior outcome).
    pub base: RuleBase,
    /// Conjunctions, tried in order; matched with a space on each side.
    pub conjunctions: Vec<String>,
    /// Context keywords.
    pub context: KeywordSet,
    /// Behavior keywords.
    pub behavior: KeywordSet,
    /// Fighting keywords.
    pub fighting: KeywordSet,
    /// Severity of the fighting outcome.
    pub fighting_severity: Severity,
}

impl ContrastClauseRule {
    fn pairs_context_with_behavior(&self, a: &str, b: &str) -> bool {
        (self.context.is_match(a) && self.behavior.is_match(b))
            || (self.context.is_match(b) && self.behavior.is_match(a))
    }

    /// Evaluate sentence by sentence, conjunction by conjunction.
    pub fn evaluate(&self, ctx: &ScanContext) -> Option<OverrideVerdict> {
        for sentence in &ctx.sentences {
            for conj in &self.conjunctions {
                let needle = format!(" {} ", conj.trim().to_lowercase());
                let Some((a, b)) = sentence.lower.split_once(&needle) else {
                    continue;
                };
                let (a, b) = (a.trim(), b.trim());
                if self.pairs_context_with_behavior(a, b) {
                    return Some(
                        self.base
                            .verdict(format!("Contrast clause detected: \"{}\"", sentence.raw)),
                    );
                }
                if self.fighting.is_match(a) || self.fighting.is_match(b) {
                    return Some(OverrideVerdict::new(
                        self.fighting_severity,
                        ["fighting"],
                        format!("Fighting mentioned in contrast clause: \"{}\"", sentence.raw),
                    ));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ContrastClauseRule {
        ContrastClauseRule {
            base: RuleBase {
                id: "classroom.contrast-clause".into(),
                name: "Contrast clause".into(),
                severity: Severity::Medium,
                priority: 300,
                enabled: true,
                tags: vec!["teacher_context".into(), "disruption".into()],
            },
            conjunctions: vec!["while".into(), "when".into()],
            context: KeywordSet::new(["speaking"]).unwrap(),
            behavior: KeywordSet::new(["playing"]).unwrap(),
            fighting: KeywordSet::new(["kicked"]).unwrap(),
            fighting_severity: Severity::High,
        }
    }

    #[test]
    fn context_and_behavior_on_either_side() {
        let r = rule();
        let v = r
            .evaluate(&ScanContext::new("Boys keep playing while she is speaking"))
            .unwrap();
        assert_eq!(v.severity, Severity::Medium);
        assert!(v.has_tag("disruption"));

        assert!(
            r.evaluate(&ScanContext::new("While she is speaking boys are playing"))
                .is_none(),
            "a leading conjunction has no space before it"
        );
    }

    #[test]
    fn fighting_in_a_clause() {
        let v = rule()
            .evaluate(&ScanContext::new("He kicked the door when nobody looked"))
            .unwrap();
        assert_eq!(v.severity, Severity::High);
        assert!(v.has_tag("fighting"));
    }

    #[test]
    fn no_conjunction_no_verdict() {
        assert!(
            rule()
                .evaluate(&ScanContext::new("She was speaking and they were playing"))
                .is_none()
        );
    }
}
