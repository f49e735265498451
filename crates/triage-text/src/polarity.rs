//! Base sentence polarity.
//!
//! [`PolarityScorer`] is the general-purpose scorer the pipeline treats as
//! a black box. [`LexiconPolarity`] is the default implementation: a
//! rule-based valence-aware scorer over whitespace tokens in the VADER
//! tradition (capitalisation, boosters, negation, contrastive "but",
//! punctuation emphasis, `x / sqrt(x² + 15)` normalisation).

use std::sync::Arc;

use triage_core::PolarityScores;

use crate::lexicon::Lexicon;

/// Sentence-level polarity function.
pub trait PolarityScorer: Send + Sync {
    /// Score a text. Total over all inputs; empty text scores all zeros.
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAIM_CAP: usize = 4;
const EXCLAIM_WEIGHT: f64 = 0.292;
const QUESTION_WEIGHT: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;
const NORMALIZE_ALPHA: f64 = 15.0;

const INCREMENTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
    "fully", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more",
    "most", "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "unbelievably", "unusually", "utterly", "very",
];

const DECREMENTERS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none",
    "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "wasnt",
    "werent", "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

fn booster(word: &str) -> Option<f64> {
    if INCREMENTERS.contains(&word) {
        Some(BOOST_INCR)
    } else if DECREMENTERS.contains(&word) {
        Some(BOOST_DECR)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `x / sqrt(x² + alpha)`, clamped to `[-1, 1]`.
pub fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Whitespace tokens with surrounding punctuation stripped, unless that
/// would leave two characters or fewer (keeps emoticons intact).
fn words_and_emoticons(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

/// Emphasis from `!` and `?`.
fn punctuation_emphasis(text: &str) -> f64 {
    let exclaims = text.matches('!').count().min(EXCLAIM_CAP);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => QUESTION_MAX,
    };
    exclaims as f64 * EXCLAIM_WEIGHT + question_amp
}

/// Lexicon-backed default polarity scorer.
#[derive(Clone, Debug)]
pub struct LexiconPolarity {
    lexicon: Arc<Lexicon>,
}

impl LexiconPolarity {
    /// Build over a shared lexicon.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// The underlying lexicon.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn scalar_inc_dec(word: &str, lower: &str, valence: f64, caps_differ: bool) -> f64 {
        let Some(mut scalar) = booster(lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if caps_differ && is_all_caps(word) {
            if valence > 0.0 {
                scalar += CAPS_INCR;
            } else {
                scalar -= CAPS_INCR;
            }
        }
        scalar
    }

    fn valence_at(&self, words: &[&str], lower: &[String], i: usize, caps_differ: bool) -> f64 {
        let Some(mut valence) = self.lexicon.get(&lower[i]) else {
            return 0.0;
        };
        if caps_differ && is_all_caps(words[i]) {
            if valence > 0.0 {
                valence += CAPS_INCR;
            } else {
                valence -= CAPS_INCR;
            }
        }
        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let j = i - distance;
            if self.lexicon.contains(&lower[j]) {
                continue;
            }
            let mut s = Self::scalar_inc_dec(words[j], &lower[j], valence, caps_differ);
            match distance {
                2 => s *= 0.95,
                3 => s *= 0.9,
                _ => {}
            }
            valence += s;
            if is_negation(&lower[j]) {
                valence *= NEGATION_SCALAR;
            }
        }
        valence
    }

    fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
        if sentiments.is_empty() {
            return PolarityScores::default();
        }
        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for &s in sentiments {
            if s > 0.0 {
                pos += s + 1.0;
            } else if s < 0.0 {
                neg += s - 1.0;
            } else {
                neu += 1.0;
            }
        }
        if pos > f64::abs(neg) {
            pos += emphasis;
        } else if pos < f64::abs(neg) {
            neg -= emphasis;
        }
        let total = pos + neg.abs() + neu;

        PolarityScores {
            pos: round_to((pos / total).abs(), 3),
            neu: round_to((neu / total).abs(), 3),
            neg: round_to((neg / total).abs(), 3),
            compound: round_to(compound, 4),
        }
    }
}

impl PolarityScorer for LexiconPolarity {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words = words_and_emoticons(text);
        if words.is_empty() {
            return PolarityScores::default();
        }
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        let caps_differ = caps > 0 && caps < words.len();

        let mut sentiments: Vec<f64> = (0..words.len())
            .map(|i| {
                if booster(&lower[i]).is_some() {
                    0.0
                } else {
                    self.valence_at(&words, &lower, i, caps_differ)
                }
            })
            .collect();

        if let Some(bi) = lower.iter().position(|w| w == "but") {
            for (si, s) in sentiments.iter_mut().enumerate() {
                if si < bi {
                    *s *= 0.5;
                } else if si > bi {
                    *s *= 1.5;
                }
            }
        }

        Self::score_valence(&sentiments, text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconPolarity {
        LexiconPolarity::new(Arc::new(Lexicon::bundled().unwrap()))
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(scorer().polarity_scores(""), PolarityScores::default());
        assert_eq!(scorer().polarity_scores("   "), PolarityScores::default());
    }

    #[test]
    fn single_lexicon_word_normalizes() {
        let s = scorer().polarity_scores("The service is good");
        // 1.9 / sqrt(1.9² + 15)
        assert!((s.compound - 0.4404).abs() < 1e-4);
        assert!(s.pos > 0.0);
        assert!((s.neg - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_lexicon_words_is_neutral() {
        let s = scorer().polarity_scores("Hi, quick question about the billing feature.");
        assert!((s.compound).abs() < f64::EPSILON);
        assert!((s.neu - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negation_flips_sign() {
        let s = scorer();
        assert!(s.polarity_scores("good").compound > 0.0);
        assert!(s.polarity_scores("not good").compound < 0.0);
        assert!(s.polarity_scores("isn't good").compound < 0.0);
    }

    #[test]
    fn boosters_and_caps_amplify() {
        let s = scorer();
        let plain = s.polarity_scores("the support was good").compound;
        let boosted = s.polarity_scores("the support was very good").compound;
        let damped = s.polarity_scores("the support was slightly good").compound;
        let shouted = s.polarity_scores("the support was GOOD").compound;
        assert!(boosted > plain);
        assert!(damped < plain);
        assert!(shouted > plain);
    }

    #[test]
    fn exclamations_amplify_up_to_cap() {
        let s = scorer();
        let one = s.polarity_scores("this is bad!").compound;
        let four = s.polarity_scores("this is bad!!!!").compound;
        let six = s.polarity_scores("this is bad!!!!!!").compound;
        assert!(four < one);
        assert!((four - six).abs() < f64::EPSILON);
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        let s = scorer().polarity_scores("the agent was nice but the wait was terrible");
        assert!(s.compound < 0.0);
    }

    #[test]
    fn proportions_sum_to_about_one() {
        let s = scorer().polarity_scores("Loved using your product, very satisfied!");
        assert!(s.compound > 0.5);
        assert!((s.pos + s.neu + s.neg - 1.0).abs() < 0.01);
    }

    #[test]
    fn emergency_shout_with_negation_is_negative() {
        let s = scorer().polarity_scores("The entire system went down! We cannot access anything! HELP!!!");
        assert!(s.compound < -0.3);
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn compound_is_bounded(text in "[a-zA-Z!? ]{0,80}") {
                let s = scorer().polarity_scores(&text);
                prop_assert!((-1.0..=1.0).contains(&s.compound));
                prop_assert!(s.pos >= 0.0 && s.neu >= 0.0 && s.neg >= 0.0);
            }

            #[test]
            fn normalize_is_bounded_and_odd(x in -1000.0f64..1000.0) {
                let n = normalize(x);
                prop_assert!((-1.0..=1.0).contains(&n));
                prop_assert!((n + normalize(-x)).abs() < 1e-12);
            }
        }
    }
}
