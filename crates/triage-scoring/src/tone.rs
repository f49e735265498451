//! Tone and emotion summary.

use std::collections::BTreeMap;
use std::sync::Arc;

use triage_core::{Intensity, StrongWord, ToneContext};
use triage_settings::ToneSettings;
use triage_text::{PosTagger, nearest_noun};

use crate::structure::StructureScorer;

struct WordHit {
    weight: f64,
    word: String,
    sentence: usize,
    index: usize,
}

/// Aggregates per-word scores into a [`ToneContext`].
pub struct ToneSummarizer {
    structure: Arc<StructureScorer>,
    tagger: Option<Arc<dyn PosTagger>>,
    settings: ToneSettings,
}

impl ToneSummarizer {
    /// Build a summarizer. Without a tagger, targets resolve to the nearest
    /// word-like token.
    pub fn new(
        structure: Arc<StructureScorer>,
        tagger: Option<Arc<dyn PosTagger>>,
        settings: ToneSettings,
    ) -> Self {
        Self {
            structure,
            tagger,
            settings,
        }
    }

    /// `{intensity} positive`, `{intensity} negative` or `neutral`.
    pub fn tone_label(&self, compound: f64) -> (String, Intensity) {
        let s = &self.settings;
        let intensity = Intensity::from_compound(compound, s.strong_threshold, s.moderate_threshold);
        let label = if compound >= s.label_threshold {
            format!("{intensity} positive")
        } else if compound <= -s.label_threshold {
            format!("{intensity} negative")
        } else {
            "neutral".to_string()
        };
        (label, intensity)
    }

    /// Summarize the tone of `text`.
    pub fn summarize_tone(&self, text: &str) -> ToneContext {
        let compound = self.structure.polarity().polarity_scores(text).compound;
        let (tone_label, intensity) = self.tone_label(compound);

        let mut sentences = self.structure.tokenizer().split_sentences(text);
        if sentences.is_empty() {
            sentences.push(text.to_string());
        }

        let mut totals = vec![0.0_f64; self.settings.emotions.len()];
        let mut hits: Vec<WordHit> = Vec::new();
        let mut sentence_tokens: Vec<Vec<String>> = Vec::with_capacity(sentences.len());

        for (si, sentence) in sentences.iter().enumerate() {
            let analysis = self.structure.score_sentence(sentence);
            for (i, c) in analysis.contributions.iter().enumerate() {
                let lower = c.token.to_lowercase();
                let magnitude = c.adjusted_valence.abs();
                for (total, emotion) in totals.iter_mut().zip(&self.settings.emotions) {
                    let markers = emotion
                        .markers
                        .iter()
                        .filter(|m| lower.contains(m.as_str()))
                        .count();
                    *total += magnitude * markers as f64;
                }
                if magnitude > self.settings.strong_word_min {
                    hits.push(WordHit {
                        weight: magnitude,
                        word: c.token.clone(),
                        sentence: si,
                        index: i,
                    });
                }
            }
            sentence_tokens.push(analysis.contributions.into_iter().map(|c| c.token).collect());
        }

        hits.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        hits.truncate(self.settings.top_k);

        let tagger = self.tagger.as_deref();
        let mut main_targets: Vec<String> = Vec::new();
        for hit in &hits {
            if let Some(noun) = nearest_noun(&sentence_tokens[hit.sentence], hit.index, tagger) {
                if !main_targets.contains(&noun) {
                    main_targets.push(noun);
                }
            }
        }

        let mut main_emotion: Option<(usize, f64)> = None;
        for (i, total) in totals.iter().enumerate() {
            if *total > main_emotion.map_or(0.0, |(_, best)| best) {
                main_emotion = Some((i, *total));
            }
        }

        ToneContext {
            tone_label,
            compound,
            intensity,
            main_emotion: main_emotion.map(|(i, _)| self.settings.emotions[i].name.clone()),
            emotion_scores: self
                .settings
                .emotions
                .iter()
                .zip(totals)
                .map(|(e, t)| (e.name.clone(), t))
                .collect::<BTreeMap<_, _>>(),
            strong_words: hits
                .into_iter()
                .map(|h| StrongWord {
                    word: h.word,
                    weight: h.weight,
                })
                .collect(),
            main_targets,
        }
    }
}

impl std::fmt::Debug for ToneSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneSummarizer")
            .field("tagger", &self.tagger.is_some())
            .field("top_k", &self.settings.top_k)
            .finish_non_exhaustive()
    }
}
