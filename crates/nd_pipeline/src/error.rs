use serde::Serialize;
use thiserror::Error;

/// Source metadata recovered before a failure, echoed back best-effort.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceInfo {
    pub url: Option<String>,
    pub domain: Option<String>,
    pub title: Option<String>,
}

/// Terminal pipeline failures. Degraded stages (empty summary, null
/// semantic score) are not errors; they ride along inside a successful
/// response instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Either 'url' or 'text' must be provided in the request body.")]
    MissingInput,

    #[error("{message}")]
    UpstreamFetch { source_info: SourceInfo, message: String },

    #[error("No usable text content was found for summarization.")]
    NoUsableText { source_info: SourceInfo },
}

impl PipelineError {
    /// HTTP status the surrounding layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::MissingInput | PipelineError::NoUsableText { .. } => 400,
            PipelineError::UpstreamFetch { .. } => 502,
        }
    }

    pub fn source(&self) -> Option<&SourceInfo> {
        match self {
            PipelineError::MissingInput => None,
            PipelineError::UpstreamFetch { source_info, .. }
            | PipelineError::NoUsableText { source_info } => Some(source_info),
        }
    }
}
