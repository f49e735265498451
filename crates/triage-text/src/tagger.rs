//! Part-of-speech tagging capability and nearest-noun resolution.
//!
//! Tagging is best-effort: a [`PosTagger`] may return `None`, in which case
//! [`nearest_noun`] falls back to the nearest word-like token.

/// Coarse part-of-speech classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// Common or proper noun.
    Noun,
    /// Verb or participle.
    Verb,
    /// Adjective.
    Adjective,
    /// Adverb or negation particle.
    Adverb,
    /// Personal or indefinite pronoun.
    Pronoun,
    /// Article, demonstrative or possessive determiner.
    Determiner,
    /// Preposition.
    Preposition,
    /// Coordinating or subordinating conjunction.
    Conjunction,
    /// Auxiliary or modal verb, including clitic forms.
    Auxiliary,
    /// Numeral.
    Number,
    /// Punctuation.
    Punctuation,
    /// Interjection or anything unclassified.
    Other,
}

/// Part-of-speech tagging capability.
pub trait PosTagger: Send + Sync {
    /// One tag per token, or `None` when the tagger cannot run.
    fn tag(&self, tokens: &[String]) -> Option<Vec<PosTag>>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "every", "each", "no", "all", "both",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "someone", "anyone", "everyone",
    "somebody", "anybody", "everybody", "nobody", "something", "anything", "everything",
    "nothing", "mine", "yours", "who", "what", "which",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "from", "to", "of", "into", "onto", "over",
    "under", "after", "before", "during", "through", "without", "between", "against", "near",
    "behind", "around", "across", "since", "until", "via", "per",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "because", "while", "when", "as", "if", "although", "though", "whilst",
    "nor", "yet", "unless", "whereas",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "will", "would", "can", "could", "should", "shall", "may", "might", "must", "ca",
    "wo", "'s", "'re", "'ve", "'ll", "'d", "'m",
];

const ADVERBS: &[&str] = &[
    "not", "n't", "very", "really", "extremely", "so", "too", "quite", "absolutely", "never",
    "always", "just", "also", "now", "here", "there", "then", "still", "again", "already",
    "even", "ever", "soon", "hardly", "rarely", "scarcely", "barely", "slightly", "almost",
];

const INTERJECTIONS: &[&str] = &["hi", "hello", "hey", "please", "thanks", "ok", "okay", "yes", "oh"];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "great", "nice", "poor", "awful", "terrible", "horrible", "happy", "sad",
    "angry", "mad", "new", "old", "slow", "fast", "quick", "easy", "hard", "best", "worst",
    "better", "worse", "fine", "excellent", "amazing", "broken", "down", "urgent",
];

const VERBS: &[&str] = &[
    "love", "loved", "hate", "like", "want", "need", "get", "got", "make", "made", "work",
    "works", "fix", "help", "keep", "kept", "stop", "go", "went", "say", "said", "see", "know",
    "think", "feel", "use", "try", "cannot",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish"];

/// Rule-based tagger that is always available.
///
/// Closed-class words and a short list of common ticket adjectives and
/// verbs come from fixed lists; other open-class words are classified by
/// suffix, and any remaining alphabetic token is a noun.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Tag a single token.
    pub fn tag_word(token: &str) -> PosTag {
        let lower = token.to_lowercase();
        let w = lower.as_str();
        let Some(first) = w.chars().next() else {
            return PosTag::Other;
        };
        if !(first.is_alphanumeric() || first == '\'') {
            return PosTag::Punctuation;
        }
        if w.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return PosTag::Number;
        }
        let closed: [(&[&str], PosTag); 9] = [
            (AUXILIARIES, PosTag::Auxiliary),
            (DETERMINERS, PosTag::Determiner),
            (PRONOUNS, PosTag::Pronoun),
            (PREPOSITIONS, PosTag::Preposition),
            (CONJUNCTIONS, PosTag::Conjunction),
            (ADVERBS, PosTag::Adverb),
            (INTERJECTIONS, PosTag::Other),
            (ADJECTIVES, PosTag::Adjective),
            (VERBS, PosTag::Verb),
        ];
        if let Some((_, tag)) = closed.iter().find(|(list, _)| list.contains(&w)) {
            return *tag;
        }
        let len = w.chars().count();
        if len > 4 && w.ends_with("ly") {
            return PosTag::Adverb;
        }
        if len > 4 && (w.ends_with("ing") || w.ends_with("ed")) {
            return PosTag::Verb;
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s)) {
            return PosTag::Adjective;
        }
        if w.chars().any(char::is_alphabetic) {
            PosTag::Noun
        } else {
            PosTag::Other
        }
    }
}

impl PosTagger for HeuristicTagger {
    fn tag(&self, tokens: &[String]) -> Option<Vec<PosTag>> {
        Some(tokens.iter().map(|t| Self::tag_word(t)).collect())
    }
}

fn is_wordlike(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Resolve the noun a token most likely refers to.
///
/// With tags, searches outward from `index` (left candidate before right)
/// for the first noun. Otherwise, or when no noun is found, returns the
/// nearest word-like token at or left of `index`, then to the right.
pub fn nearest_noun(
    tokens: &[String],
    index: usize,
    tagger: Option<&dyn PosTagger>,
) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    let index = index.min(tokens.len() - 1);

    if let Some(tags) = tagger
        .and_then(|t| t.tag(tokens))
        .filter(|tags| tags.len() == tokens.len())
    {
        for dist in 0..tokens.len().max(5) {
            let left = index.checked_sub(dist);
            let right = Some(index + dist).filter(|i| *i < tokens.len());
            for idx in [left, right].into_iter().flatten() {
                if tags[idx] == PosTag::Noun {
                    return Some(tokens[idx].clone());
                }
            }
        }
    }

    (0..=index)
        .rev()
        .chain(index + 1..tokens.len())
        .find(|&i| is_wordlike(&tokens[i]))
        .map(|i| tokens[i].clone())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
