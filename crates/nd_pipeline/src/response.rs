use nd_eval::Evaluation;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, SourceInfo};

/// Incoming request body. At least one of `url` or `text` must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub original_text: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub original_length: usize,
    pub summary_length: usize,
    pub compression_ratio: Option<f64>,
}

/// Metrics plus the wall-clock cost of the summarization stage.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationPayload {
    #[serde(flatten)]
    pub metrics: Evaluation,
    pub runtime_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub source: SourceInfo,
    pub content: Content,
    pub meta: Meta,
    pub evaluation: EvaluationPayload,
}

/// Failure envelope, mirrored by the HTTP layer and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
    pub error: String,
}

impl From<&PipelineError> for ErrorResponse {
    fn from(err: &PipelineError) -> Self {
        Self {
            success: false,
            source: err.source().cloned(),
            error: err.to_string(),
        }
    }
}
