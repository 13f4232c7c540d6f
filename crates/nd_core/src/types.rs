use serde::{Deserialize, Serialize};

/// Article content recovered from a URL. Only produced when fetching and
/// extraction both succeeded and yielded non-empty body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedArticle {
    pub url: String,
    pub domain: String,
    pub title: String,
    pub text: String,
}

/// A failed fetch or extraction, carrying whatever metadata was recovered
/// before the failure so callers can still echo it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchError {
    pub url: String,
    pub domain: String,
    pub title: String,
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}
