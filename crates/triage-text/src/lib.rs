//! # triage-text
//!
//! Text resources for the triage pipeline:
//!
//! - [`tokenizer`]: sentence splitting and word tokenization, with an
//!   optional [`TokenizerProvider`] and a regex fallback that always works
//! - [`lexicon`]: word → valence table, bundled or loaded from a file
//! - [`polarity`]: the base [`PolarityScorer`] producing pos/neu/neg/compound
//! - [`tagger`]: part-of-speech capability and nearest-noun resolution
//! - [`keywords`]: case-insensitive keyword tables matched at word starts

#![deny(unsafe_code)]

pub mod errors;
pub mod keywords;
pub mod lexicon;
pub mod polarity;
pub mod tagger;
pub mod tokenizer;

pub use errors::LexiconError;
pub use keywords::KeywordSet;
pub use lexicon::Lexicon;
pub use polarity::{LexiconPolarity, PolarityScorer};
pub use tagger::{HeuristicTagger, PosTag, PosTagger, nearest_noun};
pub use tokenizer::{Tokenizer, TokenizerProvider, TreebankTokenizer, split_sentences};
