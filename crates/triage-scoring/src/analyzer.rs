//! The analysis facade: one value wiring every stage together.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_core::{
    OverrideVerdict, PolarityScores, PriorityVerdict, SentenceAnalysis, SentimentLabel,
    ToneContext,
};
use triage_overrides::OverrideEngine;
use triage_settings::{SeverityValues, TriageSettings};
use triage_text::{
    HeuristicTagger, Lexicon, LexiconPolarity, PolarityScorer, PosTagger, Tokenizer,
};

use crate::errors::AnalyzerError;
use crate::priority::{PriorityScorer, PrioritySignals};
use crate::structure::StructureScorer;
use crate::summary::TextSummarizer;
use crate::tone::ToneSummarizer;

/// Granularity of the segment breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// One segment per word token.
    Word,
    /// One segment per sentence.
    Sentence,
    /// The whole text as one segment.
    Paragraph,
}

impl AnalysisMode {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "sentence" => Ok(Self::Sentence),
            "paragraph" => Ok(Self::Paragraph),
            other => Err(format!("unknown analysis mode: {other}")),
        }
    }
}

/// Whole-text polarity with the override adjustment applied for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSentiment {
    /// Base polarity of the whole text.
    #[serde(flatten)]
    pub scores: PolarityScores,
    /// Whether a context override replaced the displayed compound.
    pub overridden: bool,
    /// Measured compound.
    pub original_compound: f64,
    /// Label of the measured compound.
    pub original_label: SentimentLabel,
    /// Compound to display.
    pub adjusted_compound: f64,
    /// Label to display.
    pub adjusted_label: SentimentLabel,
}

impl OverallSentiment {
    fn new(
        scores: PolarityScores,
        verdict: Option<&OverrideVerdict>,
        adjusted: &SeverityValues,
    ) -> Self {
        let adjusted_compound = verdict.map_or(scores.compound, |v| adjusted.get(v.severity));
        Self {
            scores,
            overridden: verdict.is_some(),
            original_compound: scores.compound,
            original_label: scores.label(),
            adjusted_compound,
            adjusted_label: SentimentLabel::from_compound(adjusted_compound),
        }
    }
}

/// One slice of the input with its scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Segment text.
    pub text: String,
    /// Base polarity of the segment.
    pub polarity: PolarityScores,
    /// Per-word breakdown (absent in word mode or unstructured runs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<SentenceAnalysis>,
}

/// Tone summary plus the override verdict, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    /// Tone and emotion summary.
    #[serde(flatten)]
    pub tone: ToneContext,
    /// Context override verdict.
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub override_verdict: Option<OverrideVerdict>,
}

/// Everything `analyze` returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Segment granularity used.
    pub mode: AnalysisMode,
    /// Whole-text result.
    pub overall: OverallSentiment,
    /// Per-segment results.
    pub segments: Vec<Segment>,
    /// Human-readable summary.
    pub summary: String,
    /// Tone and override.
    pub context: ReportContext,
}

/// Sentiment and priority pipeline built from one settings value.
pub struct Analyzer {
    tokenizer: Arc<Tokenizer>,
    polarity: Arc<dyn PolarityScorer>,
    structure: Arc<StructureScorer>,
    tone: ToneSummarizer,
    summarizer: TextSummarizer,
    overrides: OverrideEngine,
    priority: PriorityScorer,
    adjusted: SeverityValues,
}

impl Analyzer {
    /// Build with the configured lexicon (bundled unless `text.lexiconPath`
    /// is set).
    pub fn from_settings(settings: &TriageSettings) -> Result<Self, AnalyzerError> {
        settings.validate()?;
        let lexicon = match settings.text.lexicon_path.as_deref() {
            Some(path) => Lexicon::from_path(Path::new(path))?,
            None => Lexicon::bundled()?,
        };
        Self::with_lexicon(settings, lexicon)
    }

    /// Build around a caller-supplied lexicon.
    pub fn with_lexicon(settings: &TriageSettings, lexicon: Lexicon) -> Result<Self, AnalyzerError> {
        let lexicon = Arc::new(lexicon);
        let tokenizer = Arc::new(Tokenizer::from_kind(settings.text.tokenizer));
        let polarity: Arc<dyn PolarityScorer> = Arc::new(LexiconPolarity::new(Arc::clone(&lexicon)));
        let tagger: Arc<dyn PosTagger> = Arc::new(HeuristicTagger);

        let structure = Arc::new(StructureScorer::new(
            Arc::clone(&lexicon),
            Arc::clone(&tokenizer),
            Arc::clone(&polarity),
            settings.scoring.clone(),
        ));
        let tone = ToneSummarizer::new(
            Arc::clone(&structure),
            Some(Arc::clone(&tagger)),
            settings.tone.clone(),
        );
        let summarizer = TextSummarizer::new(
            Arc::clone(&structure),
            Some(tagger),
            settings.summary.clone(),
        );
        let overrides = OverrideEngine::from_settings(&settings.overrides)?;
        let priority = PriorityScorer::new(settings.priority.clone(), &settings.tone)?;

        debug!(
            lexicon_size = lexicon.len(),
            tokenizer = ?settings.text.tokenizer,
            override_rules = overrides.rules().len(),
            "Analyzer ready"
        );

        Ok(Self {
            tokenizer,
            polarity,
            structure,
            tone,
            summarizer,
            overrides,
            priority,
            adjusted: settings.overrides.adjusted_compound,
        })
    }

    /// The per-word scorer.
    pub fn structure(&self) -> &StructureScorer {
        &self.structure
    }

    /// The override engine.
    pub fn overrides(&self) -> &OverrideEngine {
        &self.overrides
    }

    /// Base polarity of any text.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        self.polarity.polarity_scores(text)
    }

    /// `paragraph` for several lines or sentences, `word` for a single
    /// word, otherwise `sentence`.
    pub fn detect_mode(&self, text: &str) -> AnalysisMode {
        let sentences = self.tokenizer.split_sentences(text);
        let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        if lines > 1 || sentences.len() > 1 {
            return AnalysisMode::Paragraph;
        }
        let words = self
            .tokenizer
            .split_words(text)
            .iter()
            .filter(|t| t.chars().any(char::is_alphanumeric))
            .count();
        if sentences.len() == 1 && words == 1 {
            AnalysisMode::Word
        } else {
            AnalysisMode::Sentence
        }
    }

    /// Contextual override check only.
    pub fn detect_override(&self, text: &str) -> Option<OverrideVerdict> {
        self.overrides.detect(text)
    }

    /// Tone and emotion summary only.
    pub fn summarize_tone(&self, text: &str) -> ToneContext {
        self.tone.summarize_tone(text)
    }

    /// Text summary only.
    pub fn summary(&self, text: &str) -> String {
        self.summarizer.summarize(text)
    }

    /// Full analysis in the detected mode with per-word structure.
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        self.analyze_with_mode(text, None, true)
    }

    /// Full analysis in the given (or detected) mode.
    pub fn analyze_with_mode(
        &self,
        text: &str,
        mode: Option<AnalysisMode>,
        structured: bool,
    ) -> AnalysisReport {
        let mode = mode.unwrap_or_else(|| self.detect_mode(text));
        let segment_texts = match mode {
            AnalysisMode::Word => self.tokenizer.split_words(text),
            AnalysisMode::Sentence => self.tokenizer.split_sentences(text),
            AnalysisMode::Paragraph => vec![text.trim().to_string()],
        };
        let segments = segment_texts
            .into_iter()
            .map(|s| {
                let structure = (structured && mode != AnalysisMode::Word)
                    .then(|| self.structure.score_sentence(&s));
                Segment {
                    polarity: self.polarity.polarity_scores(&s),
                    text: s,
                    structure,
                }
            })
            .collect();

        let verdict = self.overrides.detect(text);
        let overall = OverallSentiment::new(
            self.polarity.polarity_scores(text),
            verdict.as_ref(),
            &self.adjusted,
        );

        AnalysisReport {
            mode,
            overall,
            segments,
            summary: self.summarizer.summarize(text),
            context: ReportContext {
                tone: self.tone.summarize_tone(text),
                override_verdict: verdict,
            },
        }
    }

    /// Triage verdict for a ticket message.
    pub fn prioritize(&self, text: &str) -> PriorityVerdict {
        let compound = self.polarity.polarity_scores(text).compound;
        let tone = self.tone.summarize_tone(text);
        let verdict = self.overrides.detect(text);
        self.priority.score(&PrioritySignals {
            text,
            compound,
            emotion: tone.main_emotion.as_deref(),
            context_override: verdict.as_ref(),
        })
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("structure", &self.structure)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use triage_core::Severity;
    use triage_settings::SettingsError;

    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::from_settings(&TriageSettings::default()).unwrap()
    }

    #[test]
    fn mode_detection() {
        let a = analyzer();
        assert_eq!(a.detect_mode("great"), AnalysisMode::Word);
        assert_eq!(a.detect_mode("great!"), AnalysisMode::Word);
        assert_eq!(a.detect_mode("The service is great"), AnalysisMode::Sentence);
        assert_eq!(a.detect_mode("It broke. Fix it."), AnalysisMode::Paragraph);
        assert_eq!(a.detect_mode("line one\nline two"), AnalysisMode::Paragraph);
        assert_eq!(a.detect_mode(""), AnalysisMode::Sentence);
    }

    #[test]
    fn mode_parses() {
        assert_eq!("Paragraph".parse::<AnalysisMode>(), Ok(AnalysisMode::Paragraph));
        assert!("essay".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn segments_follow_mode() {
        let a = analyzer();
        let r = a.analyze("The app is great. Support was terrible.");
        assert_eq!(r.mode, AnalysisMode::Paragraph);
        assert_eq!(r.segments.len(), 1);
        assert!(r.segments[0].structure.is_some());

        let r = a.analyze_with_mode(
            "The app is great. Support was terrible.",
            Some(AnalysisMode::Sentence),
            false,
        );
        assert_eq!(r.segments.len(), 2);
        assert!(r.segments.iter().all(|s| s.structure.is_none()));

        let r = a.analyze("great");
        assert_eq!(r.mode, AnalysisMode::Word);
        assert_eq!(r.segments.len(), 1);
        assert!(r.segments[0].structure.is_none());
    }

    #[test]
    fn override_adjusts_displayed_label_only() {
        let r = analyzer().analyze("Please help, the kitchen is on fire!");
        let ov = r.context.override_verdict.as_ref().unwrap();
        assert_eq!(ov.severity, Severity::High);
        assert!(r.overall.overridden);
        assert!((r.overall.adjusted_compound - -0.9).abs() < f64::EPSILON);
        assert_eq!(r.overall.adjusted_label, SentimentLabel::Negative);
        assert!((r.overall.original_compound - r.overall.scores.compound).abs() < f64::EPSILON);
    }

    #[test]
    fn no_override_keeps_compound() {
        let r = analyzer().analyze("The new dashboard is great");
        assert!(!r.overall.overridden);
        assert!((r.overall.adjusted_compound - r.overall.original_compound).abs() < f64::EPSILON);
        assert_eq!(r.overall.adjusted_label, SentimentLabel::Positive);
        assert!(r.context.override_verdict.is_none());
    }

    #[test]
    fn report_serializes_with_camel_case_and_flattened_scores() {
        let r = analyzer().analyze("Weapon detected in the building");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["mode"], "sentence");
        assert!(json["overall"]["compound"].is_number());
        assert_eq!(json["overall"]["overridden"], true);
        assert_eq!(json["context"]["override"]["severity"], "high");
        assert!(json["context"]["toneLabel"].is_string());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = TriageSettings::default();
        settings.priority.high_threshold = 0.9;
        assert_matches!(
            Analyzer::from_settings(&settings),
            Err(AnalyzerError::Settings(SettingsError::InvalidValue(_)))
        );
    }

    #[test]
    fn missing_lexicon_file_is_an_error() {
        let mut settings = TriageSettings::default();
        settings.text.lexicon_path = Some("/nonexistent/lexicon.tsv".into());
        assert_matches!(
            Analyzer::from_settings(&settings),
            Err(AnalyzerError::Lexicon(_))
        );
    }
}
