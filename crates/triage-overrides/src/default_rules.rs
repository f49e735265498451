//! Built-in override rules.
//!
//! All keyword tables come from [`OverrideSettings`], so a settings file can
//! widen or narrow any group without code changes.

use triage_core::Severity;
use triage_settings::OverrideSettings;
use triage_text::KeywordSet;

use crate::errors::OverrideError;
use crate::rules::clause::ContrastClauseRule;
use crate::rules::keyword::KeywordRule;
use crate::rules::pattern::PositionalRule;
use crate::rules::sentence::{CrossSentenceRule, PerSentenceRule, SentenceCheck};
use crate::rules::{OverrideRule, RuleBase};

/// IDs of the built-in rules, highest priority first.
pub const DEFAULT_RULE_IDS: &[&str] = &[
    "emergency.keywords",
    "weapon.keywords",
    "classroom.cross-sentence",
    "incident.per-sentence",
    "classroom.contrast-clause",
    "classroom.positional",
    "fighting.fallback",
];

fn base(id: &str, name: &str, severity: Severity, priority: i32, tags: &[&str]) -> RuleBase {
    RuleBase {
        id: id.to_string(),
        name: name.to_string(),
        severity,
        priority,
        enabled: true,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}

/// Build every built-in rule from settings.
///
/// The positional rule is left out when no positional terms are configured.
pub fn default_rules(settings: &OverrideSettings) -> Result<Vec<OverrideRule>, OverrideError> {
    let kw = &settings.keywords;
    let teacher = KeywordSet::new(&kw.teacher)?;
    let disruptive = KeywordSet::new(&kw.disruptive)?;
    let fighting = KeywordSet::new(&kw.fighting)?;

    let mut rules = vec![
        OverrideRule::Keyword(KeywordRule {
            base: base("emergency.keywords", "Emergency", Severity::High, 700, &["emergency"]),
            keywords: KeywordSet::new(&kw.emergency)?,
            reason_template: "Emergency-related keyword detected: '{keyword}'".into(),
        }),
        OverrideRule::Keyword(KeywordRule {
            base: base("weapon.keywords", "Weapons", Severity::High, 600, &["weapon"]),
            keywords: KeywordSet::new(&kw.weapon)?,
            reason_template: "Weapon-related keyword detected: '{keyword}'".into(),
        }),
        OverrideRule::CrossSentence(CrossSentenceRule {
            base: base(
                "classroom.cross-sentence",
                "Classroom disruption across sentences",
                Severity::Medium,
                500,
                &["teacher_context", "disruption"],
            ),
            context: teacher.clone(),
            behavior: disruptive.clone(),
        }),
        OverrideRule::PerSentence(PerSentenceRule {
            base: base("incident.per-sentence", "Incident sentence", Severity::High, 400, &[]),
            checks: vec![
                SentenceCheck {
                    tag: "fighting".into(),
                    severity: Severity::High,
                    reason_prefix: "Fighting/physical altercation mentioned".into(),
                    keywords: fighting.clone(),
                },
                SentenceCheck {
                    tag: "theft".into(),
                    severity: Severity::High,
                    reason_prefix: "Theft-related activity mentioned".into(),
                    keywords: KeywordSet::new(&kw.theft)?,
                },
                SentenceCheck {
                    tag: "bullying".into(),
                    severity: Severity::Medium,
                    reason_prefix: "Bullying/harassment mentioned".into(),
                    keywords: KeywordSet::new(&kw.bullying)?,
                },
                SentenceCheck {
                    tag: "rule_breaking".into(),
                    severity: Severity::Medium,
                    reason_prefix: "Rule-breaking related phrase".into(),
                    keywords: KeywordSet::new(&kw.rule_breaking)?,
                },
            ],
        }),
        OverrideRule::ContrastClause(ContrastClauseRule {
            base: base(
                "classroom.contrast-clause",
                "Contrast clause",
                Severity::Medium,
                300,
                &["teacher_context", "disruption"],
            ),
            conjunctions: settings.contrast_conjunctions.clone(),
            context: teacher.clone(),
            behavior: disruptive.clone(),
            fighting: fighting.clone(),
            fighting_severity: Severity::High,
        }),
    ];

    if settings.positional_terms.iter().any(|t| !t.trim().is_empty()) {
        rules.push(OverrideRule::Positional(PositionalRule {
            base: base(
                "classroom.positional",
                "Positional disruption",
                Severity::Medium,
                200,
                &["positional", "disruption", "teacher_context"],
            ),
            positional: PositionalRule::positional_pattern(&settings.positional_terms)?,
            behavior: disruptive,
            context: teacher,
        }));
    }

    rules.push(OverrideRule::Keyword(KeywordRule {
        base: base("fighting.fallback", "Violent language", Severity::High, 100, &["fighting"]),
        keywords: fighting,
        reason_template: "Violent/physical action words detected.".into(),
    }));

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_constant_in_priority_order() {
        let rules = default_rules(&OverrideSettings::default()).unwrap();
        let ids: Vec<&str> = rules.iter().map(|r| r.base().id.as_str()).collect();
        assert_eq!(ids, DEFAULT_RULE_IDS);
        let priorities: Vec<i32> = rules.iter().map(|r| r.base().priority).collect();
        assert!(priorities.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn positional_rule_dropped_without_terms() {
        let settings = OverrideSettings {
            positional_terms: vec![" ".into()],
            ..OverrideSettings::default()
        };
        let rules = default_rules(&settings).unwrap();
        assert_eq!(rules.len(), DEFAULT_RULE_IDS.len() - 1);
        assert!(rules.iter().all(|r| r.base().id != "classroom.positional"));
    }
}
