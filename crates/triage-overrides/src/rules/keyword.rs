//! Keyword rule: fires when any keyword from a table occurs in the text.

use triage_core::OverrideVerdict;
use triage_text::KeywordSet;

use super::RuleBase;
use crate::context::ScanContext;

/// Fires on the first keyword (in table order) found anywhere in the text.
#[derive(Debug)]
pub struct KeywordRule {
    /// Common rule fields.
    pub base: RuleBase,
    /// Keyword table.
    pub keywords: KeywordSet,
    /// Reason text; `{keyword}` is replaced by the matched keyword.
    pub reason_template: String,
}

impl KeywordRule {
    /// Evaluate against the whole text.
    pub fn evaluate(&self, ctx: &ScanContext) -> Option<OverrideVerdict> {
        let keyword = self.keywords.first_match(&ctx.text)?;
        Some(
            self.base
                .verdict(self.reason_template.replace("{keyword}", keyword)),
        )
    }
}

#[cfg(test)]
mod tests {
    use triage_core::Severity;

    use super::*;

    fn weapon_rule() -> KeywordRule {
        KeywordRule {
            base: RuleBase {
                id: "weapon.keywords".into(),
                name: "Weapons".into(),
                severity: Severity::High,
                priority: 600,
                enabled: true,
                tags: vec!["weapon".into()],
            },
            keywords: KeywordSet::new(["gun", "knife"]).unwrap(),
            reason_template: "Weapon-related keyword detected: '{keyword}'".into(),
        }
    }

    #[test]
    fn fires_with_matched_keyword_in_reason() {
        let v = weapon_rule()
            .evaluate(&ScanContext::new("He had a KNIFE"))
            .unwrap();
        assert_eq!(v.severity, Severity::High);
        assert!(v.has_tag("weapon"));
        insta::assert_snapshot!(v.reason, @"Weapon-related keyword detected: 'knife'");
    }

    #[test]
    fn silent_without_keywords() {
        assert!(weapon_rule().evaluate(&ScanContext::new("begun")).is_none());
    }
}
