use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use nd_core::{Error, Result, SummarizeOptions, SummaryModel};

use crate::Config;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
const DEFAULT_MODEL_NAME: &str = "t5-small";

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
    truncation: bool,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    model: &'a str,
    parameters: GenerationParameters,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for a hosted seq2seq summarization endpoint speaking the
/// transformers-pipeline wire shape: `{inputs, parameters}` in,
/// `[{"summary_text": ...}]` out, plus an embeddings route.
pub struct HostedModel {
    client: Client,
    endpoint: String,
    model_name: String,
    api_key: Option<String>,
}

impl HostedModel {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model_name: config
                .model_name
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            api_key: config.api_key,
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(format!("{}{}", self.endpoint, path));
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        builder
    }
}

impl fmt::Debug for HostedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedModel")
            .field("endpoint", &self.endpoint)
            .field("model_name", &self.model_name)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl SummaryModel for HostedModel {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn summarize(&self, text: &str, options: &SummarizeOptions) -> Result<String> {
        let request = SummarizeRequest {
            inputs: text,
            model: &self.model_name,
            parameters: GenerationParameters {
                max_length: options.max_length,
                min_length: options.min_length,
                do_sample: options.sample,
                truncation: true,
            },
        };

        let outputs: Vec<SummaryOutput> = self
            .request("/summarize")
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // An empty output list is a degraded-but-valid answer.
        Ok(outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .unwrap_or_default())
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            input: text,
            model: &self.model_name,
        };

        let response: EmbeddingResponse = self
            .request("/embeddings")
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| Error::Inference("embedding response contained no vectors".to_string()))
    }
}
