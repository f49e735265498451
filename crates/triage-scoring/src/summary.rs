//! Plain-text summary of an analysis.

use std::sync::Arc;

use triage_core::text::format_score;
use triage_settings::SummarySettings;
use triage_text::{PosTagger, nearest_noun};

use crate::structure::StructureScorer;

fn word_polarity(adjusted: f64) -> &'static str {
    if adjusted > 0.0 {
        "positive"
    } else if adjusted < 0.0 {
        "negative"
    } else {
        "neutral"
    }
}

/// Writes the multi-line text summary shown with every analysis.
pub struct TextSummarizer {
    structure: Arc<StructureScorer>,
    tagger: Option<Arc<dyn PosTagger>>,
    settings: SummarySettings,
}

impl TextSummarizer {
    /// Build a summarizer.
    pub fn new(
        structure: Arc<StructureScorer>,
        tagger: Option<Arc<dyn PosTagger>>,
        settings: SummarySettings,
    ) -> Self {
        Self {
            structure,
            tagger,
            settings,
        }
    }

    /// One overall line, one line per sentence up to the configured limit,
    /// and an omission line when sentences were dropped.
    pub fn summarize(&self, text: &str) -> String {
        let overall = self.structure.polarity().polarity_scores(text);
        let mut lines = vec![format!(
            "Overall sentiment: {} (compound={})",
            overall.label(),
            format_score(overall.compound)
        )];

        let mut sentences = self.structure.tokenizer().split_sentences(text);
        if sentences.is_empty() {
            sentences.push(text.to_string());
        }
        let limit = self.settings.sentences_limit;

        for (n, sentence) in sentences.iter().take(limit).enumerate() {
            lines.push(self.sentence_line(n + 1, sentence));
        }
        if sentences.len() > limit {
            lines.push(format!(
                "...and {} more sentences omitted.",
                sentences.len() - limit
            ));
        }
        lines.join("\n")
    }

    fn sentence_line(&self, n: usize, sentence: &str) -> String {
        let analysis = self.structure.score_sentence(sentence);
        if analysis.contributions.is_empty() {
            return format!("Sentence {n}: no strong sentiment words detected.");
        }

        let mut ranked: Vec<(usize, f64)> = analysis
            .contributions
            .iter()
            .map(|c| c.adjusted_valence)
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

        let tokens: Vec<String> = analysis
            .contributions
            .iter()
            .map(|c| c.token.clone())
            .collect();
        let tagger = self.tagger.as_deref();
        let parts: Vec<String> = ranked
            .into_iter()
            .take(self.settings.key_words_per_sentence)
            .map(|(idx, adjusted)| {
                let word = &tokens[idx];
                let polarity = word_polarity(adjusted);
                match nearest_noun(&tokens, idx, tagger) {
                    Some(target) => format!("'{word}' ({polarity}) -> {target}"),
                    None => format!("'{word}' ({polarity})"),
                }
            })
            .collect();

        format!(
            "Sentence {n}: mostly {}. Key: {}",
            analysis.base_polarity.label(),
            parts.join("; ")
        )
    }
}

impl std::fmt::Debug for TextSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSummarizer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use triage_text::HeuristicTagger;

    use super::*;
    use crate::structure::tests::scorer;

    fn summarizer(limit: usize) -> TextSummarizer {
        TextSummarizer::new(
            Arc::new(scorer()),
            Some(Arc::new(HeuristicTagger) as Arc<dyn PosTagger>),
            SummarySettings {
                sentences_limit: limit,
                ..SummarySettings::default()
            },
        )
    }

    #[test]
    fn sentence_lines_with_targets() {
        let summary = summarizer(5).summarize("The support was good. The app is bad!");
        insta::assert_snapshot!(summary, @r"
        Overall sentiment: negative (compound=-0.224)
        Sentence 1: mostly positive. Key: 'good' (positive) -> support; 'The' (neutral) -> support
        Sentence 2: mostly negative. Key: 'bad' (negative) -> app; 'The' (neutral) -> app
        ");
    }

    #[test]
    fn omitted_sentences_are_counted() {
        let summary = summarizer(1).summarize("Good. Bad. Fine.");
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Sentence 1: mostly positive."));
        assert_eq!(lines[2], "...and 2 more sentences omitted.");
    }

    #[test]
    fn empty_text() {
        let summary = summarizer(5).summarize("");
        insta::assert_snapshot!(summary, @r"
        Overall sentiment: neutral (compound=0.000)
        Sentence 1: no strong sentiment words detected.
        ");
    }
}
