//! BERTScore-style semantic similarity: greedy cosine matching between
//! per-token embeddings of candidate and reference, rescaled against a
//! baseline for readability. The original article stands in as a pseudo
//! reference, so the result is a similarity signal rather than a
//! faithfulness guarantee.

use std::collections::HashMap;
use std::sync::Arc;

use nd_core::{Error, Result, SummaryModel};
use tracing::warn;

use crate::{round4, Score};

/// Rescaling baseline for an English bert-base-style model. Raw greedy
/// cosine scores cluster near the top of the range; rescaling spreads them
/// out. Dissimilar pairs can land below zero, same as the reference
/// tooling.
pub const DEFAULT_BASELINE: f64 = 0.85;

pub struct SemanticScorer {
    model: Arc<dyn SummaryModel>,
    baseline: Option<f64>,
}

impl SemanticScorer {
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        Self {
            model,
            baseline: Some(DEFAULT_BASELINE),
        }
    }

    pub fn without_rescaling(model: Arc<dyn SummaryModel>) -> Self {
        Self {
            model,
            baseline: None,
        }
    }

    /// Best-effort scoring: any failure in the underlying model is logged
    /// and swallowed, yielding `None` so the evaluation as a whole still
    /// succeeds.
    pub async fn score(&self, candidate: &str, reference: &str) -> Option<Score> {
        match self.try_score(candidate, reference).await {
            Ok(score) => Some(score),
            Err(err) => {
                warn!("semantic scoring degraded: {}", err);
                None
            }
        }
    }

    async fn try_score(&self, candidate: &str, reference: &str) -> Result<Score> {
        let candidate_vectors = self.embed_tokens(candidate).await?;
        let reference_vectors = self.embed_tokens(reference).await?;
        if candidate_vectors.is_empty() || reference_vectors.is_empty() {
            return Err(Error::Evaluation("no tokens to score".to_string()));
        }

        // Greedy matching: every candidate token takes its best reference
        // match (precision side), and vice versa for recall.
        let precision = mean_best_similarity(&candidate_vectors, &reference_vectors);
        let recall = mean_best_similarity(&reference_vectors, &candidate_vectors);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        let (precision, recall, f1) = match self.baseline {
            Some(baseline) => (
                rescale(precision, baseline),
                rescale(recall, baseline),
                rescale(f1, baseline),
            ),
            None => (precision, recall, f1),
        };

        Ok(Score {
            precision: round4(precision),
            recall: round4(recall),
            f1: round4(f1),
        })
    }

    /// One embedding per whitespace token, with repeated tokens embedded
    /// only once per call.
    async fn embed_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>> {
        let mut cache: HashMap<&str, Vec<f32>> = HashMap::new();
        let mut vectors = Vec::new();
        for token in text.split_whitespace() {
            if !cache.contains_key(token) {
                let vector = self.model.generate_embeddings(token).await?;
                cache.insert(token, vector);
            }
            vectors.push(cache[token].clone());
        }
        Ok(vectors)
    }
}

fn mean_best_similarity(from: &[Vec<f32>], to: &[Vec<f32>]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|vector| {
            to.iter()
                .map(|other| cosine(vector, other))
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .sum();
    total / from.len() as f64
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn rescale(score: f64, baseline: f64) -> f64 {
    (score - baseline) / (1.0 - baseline)
}
