//! Automatic summary-quality metrics: ROUGE lexical overlap, word counts,
//! vocabulary coverage, and a best-effort embedding-based semantic score.

use std::collections::HashSet;

use serde::Serialize;

pub mod rouge;
pub mod semantic;

pub use semantic::SemanticScorer;

/// Precision/recall/F1 triple, each rounded to 4 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCounts {
    pub original: usize,
    pub summary: usize,
}

/// Full evaluation payload. Metric fields are `None` whenever either side
/// of the pair was empty, or (for `bertscore`) when semantic scoring
/// degraded; word counts are always present.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub rouge1: Option<Score>,
    pub rouge2: Option<Score>,
    #[serde(rename = "rougeLsum")]
    pub rouge_lsum: Option<Score>,
    pub word_counts: WordCounts,
    pub vocab_coverage: Option<f64>,
    pub bertscore: Option<Score>,
}

pub struct Evaluator {
    scorer: Option<SemanticScorer>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Evaluator with lexical metrics only; `bertscore` stays `None`.
    pub fn new() -> Self {
        Self { scorer: None }
    }

    pub fn with_scorer(scorer: SemanticScorer) -> Self {
        Self {
            scorer: Some(scorer),
        }
    }

    /// Score `summary` against `original_text` as reference. Either side
    /// empty after trimming nulls every pair metric; word counts survive.
    pub async fn evaluate(&self, original_text: &str, summary: &str) -> Evaluation {
        let original = original_text.trim();
        let candidate = summary.trim();

        let word_counts = WordCounts {
            original: original.split_whitespace().count(),
            summary: candidate.split_whitespace().count(),
        };

        if original.is_empty() || candidate.is_empty() {
            return Evaluation {
                rouge1: None,
                rouge2: None,
                rouge_lsum: None,
                word_counts,
                vocab_coverage: None,
                bertscore: None,
            };
        }

        // Share of the summary's distinct tokens that appear in the article.
        let original_vocab: HashSet<&str> = original.split_whitespace().collect();
        let summary_vocab: HashSet<&str> = candidate.split_whitespace().collect();
        let overlap = original_vocab.intersection(&summary_vocab).count();
        let vocab_coverage = round4(overlap as f64 / summary_vocab.len().max(1) as f64);

        let rouge = rouge::score(original, candidate);

        let bertscore = match &self.scorer {
            Some(scorer) => scorer.score(candidate, original).await,
            None => None,
        };

        Evaluation {
            rouge1: Some(rouge.rouge1),
            rouge2: Some(rouge.rouge2),
            rouge_lsum: Some(rouge.rouge_lsum),
            word_counts,
            vocab_coverage: Some(vocab_coverage),
            bertscore,
        }
    }
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
