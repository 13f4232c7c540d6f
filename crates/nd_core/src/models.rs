use async_trait::async_trait;

use crate::Result;

/// Generation bounds handed through to the underlying model, expressed in
/// the model's native token units rather than characters.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    pub max_length: u32,
    pub min_length: u32,
    pub sample: bool,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            max_length: 130,
            min_length: 30,
            sample: false,
        }
    }
}

#[async_trait]
pub trait SummaryModel: Send + Sync {
    fn name(&self) -> &str;

    /// Generate an abstractive summary of `text` within the given bounds.
    async fn summarize(&self, text: &str, options: &SummarizeOptions) -> Result<String>;

    /// Generate an embedding vector for a piece of text.
    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>>;
}
