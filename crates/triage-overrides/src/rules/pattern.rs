//! Positional rule: a location word, disruptive behavior and classroom
//! context anywhere in the same text.

use regex::Regex;
use triage_core::OverrideVerdict;
use triage_text::KeywordSet;

use super::RuleBase;
use crate::context::ScanContext;
use crate::errors::OverrideError;

/// Fires when the positional pattern, a behavior keyword and a context
/// keyword all occur in the text.
#[derive(Debug)]
pub struct PositionalRule {
    /// Common rule fields.
    pub base: RuleBase,
    /// Whole-word positional pattern.
    pub positional: Regex,
    /// Behavior keywords.
    pub behavior: KeywordSet,
    /// Context keywords.
    pub context: KeywordSet,
}

impl PositionalRule {
    /// Compile `\b(term|term|...)\b` from positional terms.
    pub fn positional_pattern<S: AsRef<str>>(terms: &[S]) -> Result<Regex, OverrideError> {
        let alternatives: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Err(OverrideError::InvalidRule {
                rule_id: "classroom.positional".into(),
                message: "no positional terms".into(),
            });
        }
        Ok(Regex::new(&format!(
            r"(?i)\b({})\b",
            alternatives.join("|")
        ))?)
    }

    /// Evaluate against the whole text.
    pub fn evaluate(&self, ctx: &ScanContext) -> Option<OverrideVerdict> {
        let text = &ctx.text;
        (self.positional.is_match(text) && self.behavior.is_match(text) && self.context.is_match(text))
            .then(|| {
                self.base.verdict(
                    "Positional mention with disruptive action detected (e.g., 'back' + 'playing')",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use triage_core::Severity;

    use super::*;

    fn rule() -> PositionalRule {
        PositionalRule {
            base: RuleBase {
                id: "classroom.positional".into(),
                name: "Positional disruption".into(),
                severity: Severity::Medium,
                priority: 200,
                enabled: true,
                tags: vec!["positional".into(), "disruption".into(), "teacher_context".into()],
            },
            positional: PositionalRule::positional_pattern(&["back", "rear"]).unwrap(),
            behavior: KeywordSet::new(["playing"]).unwrap(),
            context: KeywordSet::new(["class"]).unwrap(),
        }
    }

    #[test]
    fn needs_all_three_signals() {
        let r = rule();
        let v = r
            .evaluate(&ScanContext::new("In class the boys at the back keep playing"))
            .unwrap();
        assert_eq!(v.tags.len(), 3);
        assert!(r.evaluate(&ScanContext::new("The boys at the back keep playing")).is_none());
        assert!(r.evaluate(&ScanContext::new("In class the boys keep playing")).is_none());
    }

    #[test]
    fn positional_terms_are_whole_words() {
        let r = rule();
        assert!(r.evaluate(&ScanContext::new("In class the backpack kids keep playing")).is_none());
    }

    #[test]
    fn empty_terms_are_rejected() {
        let none: [&str; 0] = [];
        assert_matches!(
            PositionalRule::positional_pattern(&none),
            Err(OverrideError::InvalidRule { .. })
        );
    }
}
