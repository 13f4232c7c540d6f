use async_trait::async_trait;

use nd_core::{Result, SummarizeOptions, SummaryModel};

const EMBEDDING_DIMENSIONS: usize = 256;

/// Deterministic offline model for tests and endpoint-less runs: the
/// "summary" is the leading span of the input, embeddings are normalized
/// character-frequency vectors.
#[derive(Debug, Default)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SummaryModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn summarize(&self, text: &str, options: &SummarizeOptions) -> Result<String> {
        // Treat max_length as a word budget and echo the leading words.
        let words: Vec<&str> = text
            .split_whitespace()
            .take(options.max_length as usize)
            .collect();
        Ok(words.join(" "))
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0_f32; EMBEDDING_DIMENSIONS];
        let total = text.chars().count().max(1) as f32;
        for c in text.chars() {
            let bucket = (c as u32 as usize) % EMBEDDING_DIMENSIONS;
            embedding[bucket] += 1.0 / total;
        }
        Ok(embedding)
    }
}
