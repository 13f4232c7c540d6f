//! Request orchestration: fetch → extract → validate → normalize →
//! summarize → evaluate → respond, with early exits into the failure
//! taxonomy at each stage.

use std::sync::Arc;
use std::time::Instant;

use nd_core::text::normalize_for_summary;
use nd_core::{SummarizeOptions, SummaryModel};
use nd_eval::{Evaluator, SemanticScorer};
use nd_extract::fetch_article;
use tracing::{info, warn};

pub mod error;
pub mod response;

pub use error::{PipelineError, SourceInfo};
pub use response::{
    Content, ErrorResponse, EvaluationPayload, Meta, SummarizeRequest, SummarizeResponse,
};

pub struct Pipeline {
    model: Arc<dyn SummaryModel>,
    evaluator: Evaluator,
    options: SummarizeOptions,
}

impl Pipeline {
    /// Pipeline with the model doing double duty: summarization and the
    /// embeddings behind the semantic score.
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        let evaluator = Evaluator::with_scorer(SemanticScorer::new(model.clone()));
        Self {
            model,
            evaluator,
            options: SummarizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SummarizeOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(
        &self,
        request: SummarizeRequest,
    ) -> Result<SummarizeResponse, PipelineError> {
        let url = request.url.filter(|u| !u.is_empty());
        let mut raw_text = request.text.filter(|t| !t.is_empty());

        if url.is_none() && raw_text.is_none() {
            return Err(PipelineError::MissingInput);
        }

        let mut source = SourceInfo {
            url: url.clone(),
            domain: None,
            title: None,
        };

        if let Some(url) = &url {
            match fetch_article(url).await {
                Ok(article) => {
                    source.domain = Some(article.domain);
                    source.title = Some(article.title);
                    raw_text = Some(article.text);
                }
                Err(err) => {
                    source.domain = (!err.domain.is_empty()).then_some(err.domain);
                    source.title = (!err.title.is_empty()).then_some(err.title);
                    match raw_text {
                        // No fallback text: the fetch failure is terminal.
                        None => {
                            return Err(PipelineError::UpstreamFetch {
                                source_info: source,
                                message: err.message,
                            });
                        }
                        Some(_) => {
                            warn!(%url, "fetch failed, using supplied text: {}", err.message);
                        }
                    }
                }
            }
        }

        let final_text = raw_text.unwrap_or_default();
        if final_text.trim().is_empty() {
            return Err(PipelineError::NoUsableText { source_info: source });
        }

        let input = normalize_for_summary(&final_text);

        let started = Instant::now();
        let summary = match self.model.summarize(&input, &self.options).await {
            Ok(summary) => summary,
            Err(err) => {
                // Degraded, not fatal: respond with an empty summary and
                // let the evaluator null the pair metrics.
                warn!("summarization degraded to empty output: {}", err);
                String::new()
            }
        };
        let runtime_ms = started.elapsed().as_millis() as u64;
        info!(
            model = self.model.name(),
            runtime_ms,
            summary_chars = summary.chars().count(),
            "summarization finished"
        );

        let metrics = self.evaluator.evaluate(&final_text, &summary).await;

        let original_length = final_text.chars().count();
        let summary_length = summary.chars().count();
        let compression_ratio = (original_length > 0)
            .then(|| round3(summary_length as f64 / original_length as f64));

        Ok(SummarizeResponse {
            success: true,
            source,
            content: Content {
                original_text: final_text,
                summary,
            },
            meta: Meta {
                original_length,
                summary_length,
                compression_ratio,
            },
            evaluation: EvaluationPayload {
                metrics,
                runtime_ms,
            },
        })
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::{Error, Result};
    use nd_inference::DummyModel;

    fn pipeline() -> Pipeline {
        Pipeline::new(Arc::new(DummyModel::new()))
    }

    /// Model whose every call fails, for the degraded-summary path.
    #[derive(Debug)]
    struct OfflineModel;

    #[async_trait]
    impl SummaryModel for OfflineModel {
        fn name(&self) -> &str {
            "offline"
        }

        async fn summarize(&self, _text: &str, _options: &SummarizeOptions) -> Result<String> {
            Err(Error::Inference("model offline".to_string()))
        }

        async fn generate_embeddings(&self, _text: &str) -> Result<Vec<f32>> {
            Err(Error::Inference("model offline".to_string()))
        }
    }

    #[tokio::test]
    async fn missing_input_fails_with_400() {
        let err = pipeline()
            .run(SummarizeRequest::default())
            .await
            .expect_err("no input given");
        assert!(matches!(err, PipelineError::MissingInput));
        assert_eq!(err.status_code(), 400);
        assert!(err.source().is_none());
    }

    #[tokio::test]
    async fn empty_strings_count_as_missing_input() {
        let request = SummarizeRequest {
            url: Some(String::new()),
            text: Some(String::new()),
        };
        let err = pipeline().run(request).await.expect_err("empty input");
        assert!(matches!(err, PipelineError::MissingInput));
    }

    #[tokio::test]
    async fn whitespace_text_fails_as_unusable() {
        let request = SummarizeRequest {
            url: None,
            text: Some("   \n\t ".to_string()),
        };
        let err = pipeline().run(request).await.expect_err("unusable text");
        assert!(matches!(err, PipelineError::NoUsableText { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn fetch_failure_without_fallback_is_a_502() {
        let request = SummarizeRequest {
            url: Some("http://127.0.0.1:9/article".to_string()),
            text: None,
        };
        let err = pipeline().run(request).await.expect_err("fetch must fail");
        assert_eq!(err.status_code(), 502);
        match err {
            PipelineError::UpstreamFetch { source_info, message } => {
                assert_eq!(source_info.domain.as_deref(), Some("127.0.0.1"));
                assert!(message.starts_with("Network or HTTP error:"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_failure_with_fallback_text_still_succeeds() {
        let request = SummarizeRequest {
            url: Some("http://127.0.0.1:9/article".to_string()),
            text: Some("Fallback body text for the summarizer to work with.".to_string()),
        };
        let response = pipeline().run(request).await.expect("fallback succeeds");
        assert!(response.success);
        assert!(response.content.summary.contains("Fallback body text"));
    }

    #[tokio::test]
    async fn raw_text_round_trip_scores_identity_metrics() {
        let text = "Apollo 11 landed on the Moon in 1969. \
                    It was commanded by Neil Armstrong.";
        let request = SummarizeRequest {
            url: None,
            text: Some(text.to_string()),
        };
        let response = pipeline().run(request).await.expect("pipeline succeeds");

        // The dummy model echoes short inputs, so the summary equals the
        // original and every identity metric maxes out.
        assert_eq!(response.content.summary, text);
        assert_eq!(response.meta.compression_ratio, Some(1.0));
        assert_eq!(response.evaluation.metrics.vocab_coverage, Some(1.0));
        let rouge1 = response.evaluation.metrics.rouge1.expect("rouge1 present");
        assert!(rouge1.f1 > 0.99);
        let bertscore = response.evaluation.metrics.bertscore.expect("bertscore present");
        assert!(bertscore.f1 > 0.99);
    }

    #[tokio::test]
    async fn model_failure_degrades_to_an_empty_summary_not_an_error() {
        let pipeline = Pipeline::new(Arc::new(OfflineModel));
        let request = SummarizeRequest {
            url: None,
            text: Some("Some article text the model will never see succeed.".to_string()),
        };
        let response = pipeline.run(request).await.expect("degraded, not failed");

        assert!(response.success);
        assert_eq!(response.content.summary, "");
        assert_eq!(response.meta.summary_length, 0);
        assert_eq!(response.meta.compression_ratio, Some(0.0));
        // The empty summary trips the evaluator's guard: pair metrics null,
        // word counts intact.
        assert!(response.evaluation.metrics.rouge1.is_none());
        assert!(response.evaluation.metrics.rouge2.is_none());
        assert!(response.evaluation.metrics.rouge_lsum.is_none());
        assert!(response.evaluation.metrics.vocab_coverage.is_none());
        assert!(response.evaluation.metrics.bertscore.is_none());
        assert_eq!(response.evaluation.metrics.word_counts.summary, 0);
        assert!(response.evaluation.metrics.word_counts.original > 0);
    }

    #[tokio::test]
    async fn long_input_is_truncated_before_the_model_but_reported_whole() {
        let text = format!("{} tail", "word ".repeat(1200));
        let request = SummarizeRequest {
            url: None,
            text: Some(text.clone()),
        };
        let response = pipeline().run(request).await.expect("pipeline succeeds");
        assert_eq!(response.meta.original_length, text.chars().count());
        // Model input was capped, so the echoed summary is shorter.
        assert!(response.meta.summary_length < response.meta.original_length);
    }

    #[tokio::test]
    async fn error_envelope_carries_the_human_readable_message() {
        let err = pipeline()
            .run(SummarizeRequest::default())
            .await
            .expect_err("no input");
        let envelope = ErrorResponse::from(&err);
        assert!(!envelope.success);
        assert!(envelope.error.contains("'url' or 'text'"));
        assert!(envelope.source.is_none());
    }
}
