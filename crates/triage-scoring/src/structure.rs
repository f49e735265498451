//! Structure-aware per-word scoring.
//!
//! For each token: lexicon valence, then the directly preceding booster,
//! then negation within the window, then the sentence-wide punctuation
//! factor. The order is fixed; all adjustments multiply the same value.

use std::collections::HashSet;
use std::sync::Arc;

use triage_core::{SentenceAnalysis, WordContribution};
use triage_settings::ScoringSettings;
use triage_text::{Lexicon, PolarityScorer, Tokenizer};

/// Scores sentences word by word against a lexicon.
pub struct StructureScorer {
    lexicon: Arc<Lexicon>,
    tokenizer: Arc<Tokenizer>,
    polarity: Arc<dyn PolarityScorer>,
    negations: HashSet<String>,
    settings: ScoringSettings,
}

impl StructureScorer {
    /// Build a scorer.
    pub fn new(
        lexicon: Arc<Lexicon>,
        tokenizer: Arc<Tokenizer>,
        polarity: Arc<dyn PolarityScorer>,
        settings: ScoringSettings,
    ) -> Self {
        let negations = settings.negations.iter().map(|n| n.to_lowercase()).collect();
        Self {
            lexicon,
            tokenizer,
            polarity,
            negations,
            settings,
        }
    }

    /// Tokenizer shared with the rest of the pipeline.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Base polarity scorer.
    pub fn polarity(&self) -> &dyn PolarityScorer {
        self.polarity.as_ref()
    }

    /// Sentence-wide emphasis multiplier from `!` and `?` counts.
    pub fn punct_factor(&self, sentence: &str) -> f64 {
        let s = &self.settings;
        let exclaims = sentence.matches('!').count().min(s.exclamation_cap);
        let questions = sentence.matches('?').count().min(s.question_cap);
        1.0 + exclaims as f64 * s.exclamation_weight + questions as f64 * s.question_weight
    }

    fn base_valence(&self, lower: &str) -> (f64, Option<&'static str>) {
        if let Some(v) = self.lexicon.get(lower) {
            return (v, Some("lexicon"));
        }
        let stripped = lower.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'));
        match self.lexicon.get(stripped) {
            Some(v) if !stripped.is_empty() => (v, Some("lexicon(stripped)")),
            _ => (0.0, None),
        }
    }

    /// Score a sentence with the configured negation window.
    pub fn score_sentence(&self, sentence: &str) -> SentenceAnalysis {
        self.score_sentence_with_window(sentence, self.settings.negation_window)
    }

    /// Score a sentence, scanning `negation_window` preceding tokens for
    /// negation words.
    pub fn score_sentence_with_window(
        &self,
        sentence: &str,
        negation_window: usize,
    ) -> SentenceAnalysis {
        let words = self.tokenizer.split_words(sentence);
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let punct = self.punct_factor(sentence);

        let mut contributions = Vec::with_capacity(words.len());
        let mut structure_score = 0.0;

        for (i, word) in words.iter().enumerate() {
            let (base, source) = self.base_valence(&lower[i]);
            let mut notes: Vec<String> = source.map(String::from).into_iter().collect();
            let mut adjusted = base;

            if let Some(prev) = i.checked_sub(1).map(|p| lower[p].as_str()) {
                if let Some(factor) = self.settings.boosters.get(prev) {
                    adjusted *= factor;
                    notes.push(format!("booster({prev}={factor})"));
                }
            }

            let negated = lower[i.saturating_sub(negation_window)..i]
                .iter()
                .any(|w| self.negations.contains(w));
            if negated && base != 0.0 {
                adjusted *= self.settings.negation_scalar;
                notes.push("negation".into());
            }

            if base != 0.0 {
                adjusted *= punct;
                if (punct - 1.0).abs() > f64::EPSILON {
                    notes.push(format!("punct({punct:.2})"));
                }
            }

            structure_score += adjusted;
            contributions.push(WordContribution {
                token: word.clone(),
                base_valence: base,
                adjusted_valence: adjusted,
                notes,
            });
        }

        SentenceAnalysis {
            text: sentence.to_string(),
            contributions,
            structure_score,
            base_polarity: self.polarity.polarity_scores(sentence),
        }
    }
}

impl std::fmt::Debug for StructureScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureScorer")
            .field("lexicon_size", &self.lexicon.len())
            .field("tokenizer", &self.tokenizer)
            .field("negation_window", &self.settings.negation_window)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use triage_text::LexiconPolarity;

    use super::*;

    pub(crate) fn scorer() -> StructureScorer {
        let lexicon = Arc::new(Lexicon::from_pairs([
            ("good", 1.9),
            ("bad", -2.5),
            ("love", 3.2),
            ("hate", -2.7),
            ("happy", 2.7),
            ("angry", -2.3),
        ]));
        StructureScorer::new(
            Arc::clone(&lexicon),
            Arc::new(Tokenizer::default()),
            Arc::new(LexiconPolarity::new(lexicon)),
            ScoringSettings::default(),
        )
    }

    fn adjusted(analysis: &SentenceAnalysis, word: &str) -> f64 {
        analysis
            .contributions
            .iter()
            .find(|c| c.token == word)
            .map(|c| c.adjusted_valence)
            .unwrap()
    }

    #[test]
    fn plain_lexicon_word() {
        let a = scorer().score_sentence("The service is good");
        assert_eq!(a.contributions.len(), 4);
        assert!((adjusted(&a, "good") - 1.9).abs() < 1e-9);
        assert!((a.structure_score - 1.9).abs() < 1e-9);
        assert_eq!(a.contributions[3].notes, ["lexicon"]);
        assert!((a.base_polarity.compound - 0.4404).abs() < 1e-4);
    }

    #[test]
    fn negation_inverts_and_scales() {
        let a = scorer().score_sentence("not good");
        assert!((adjusted(&a, "good") - (-0.74 * 1.9)).abs() < 1e-9);
        assert_eq!(a.contributions[1].notes, ["lexicon", "negation"]);
    }

    #[test]
    fn clitic_negation_is_reachable() {
        let a = scorer().score_sentence("It isn't good");
        assert!(adjusted(&a, "good") < 0.0);
    }

    #[test]
    fn negation_outside_window_is_ignored() {
        let a = scorer().score_sentence("not that it was ever good");
        assert!((adjusted(&a, "good") - 1.9).abs() < 1e-9);
        let wide = scorer().score_sentence_with_window("not that it was ever good", 5);
        assert!(adjusted(&wide, "good") < 0.0);
    }

    #[test]
    fn negating_a_neutral_word_is_a_no_op() {
        let a = scorer().score_sentence("not today");
        assert!(a.contributions.iter().all(|c| c.notes.is_empty()));
        assert!(a.structure_score.abs() < f64::EPSILON);
    }

    #[test]
    fn boosters_scale_only_the_next_token() {
        let s = scorer();
        let strong = s.score_sentence("extremely good");
        let weak = s.score_sentence("slightly good");
        let gap = s.score_sentence("extremely very good");
        assert!((adjusted(&strong, "good") - 3.8).abs() < 1e-9);
        assert!((adjusted(&weak, "good") - 0.95).abs() < 1e-9);
        assert!((adjusted(&gap, "good") - 2.85).abs() < 1e-9);
        assert_eq!(strong.contributions[1].notes, ["lexicon", "booster(extremely=2)"]);
    }

    #[test]
    fn booster_then_negation_then_punctuation() {
        let a = scorer().score_sentence("not very good!");
        let expected = 1.9 * 1.5 * -0.74 * 1.08;
        assert!((adjusted(&a, "good") - expected).abs() < 1e-9);
        assert_eq!(
            a.contributions[2].notes,
            ["lexicon", "booster(very=1.5)", "negation", "punct(1.08)"]
        );
    }

    #[test]
    fn punctuation_factor_is_capped() {
        let s = scorer();
        assert!((s.punct_factor("good") - 1.0).abs() < f64::EPSILON);
        assert!((s.punct_factor("good!!!") - 1.24).abs() < 1e-9);
        assert!((s.punct_factor("good!!!!!!") - 1.24).abs() < 1e-9);
        assert!((s.punct_factor("good???") - 1.06).abs() < 1e-9);
    }

    struct Whitespace;

    impl triage_text::TokenizerProvider for Whitespace {
        fn name(&self) -> &'static str {
            "whitespace"
        }

        fn tokenize(&self, text: &str) -> Option<Vec<String>> {
            Some(text.split_whitespace().map(String::from).collect())
        }
    }

    #[test]
    fn stripped_lookup_when_tokens_keep_punctuation() {
        let lexicon = Arc::new(Lexicon::from_pairs([("good", 1.9)]));
        let s = StructureScorer::new(
            Arc::clone(&lexicon),
            Arc::new(Tokenizer::with_provider(Whitespace)),
            Arc::new(LexiconPolarity::new(lexicon)),
            ScoringSettings::default(),
        );
        let a = s.score_sentence("so \"good\"");
        assert_eq!(a.contributions[1].token, "\"good\"");
        assert_eq!(a.contributions[1].notes, ["lexicon(stripped)", "booster(so=1.4)"]);
        assert!((a.contributions[1].adjusted_valence - 1.9 * 1.4).abs() < 1e-9);
    }

    #[test]
    fn empty_sentence_has_no_contributions() {
        let a = scorer().score_sentence("");
        assert!(a.contributions.is_empty());
        assert!(a.structure_score.abs() < f64::EPSILON);
        assert!(a.base_polarity.compound.abs() < f64::EPSILON);
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn extra_exclamations_never_raise_the_factor(n in 3usize..20) {
                let s = scorer();
                let capped = s.punct_factor("bad!!!");
                let more = s.punct_factor(&format!("bad{}", "!".repeat(n)));
                prop_assert!((capped - more).abs() < 1e-12);
            }

            #[test]
            fn negation_flips_sign(word in prop::sample::select(vec!["good", "bad", "love", "hate"])) {
                let s = scorer();
                let plain = adjusted(&s.score_sentence(word), word);
                let negated = adjusted(&s.score_sentence(&format!("never {word}")), word);
                prop_assert!(plain * negated < 0.0);
                prop_assert!((negated.abs() - plain.abs() * 0.74).abs() < 1e-9);
            }
        }
    }
}
