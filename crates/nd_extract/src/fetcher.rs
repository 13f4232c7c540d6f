use std::time::Duration;

use nd_core::{FetchError, FetchedArticle, Result};
use tracing::debug;
use url::Url;

use crate::extract::extract;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Some news sites answer bare client UAs with a 403.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Fetch raw HTML for a page. Network failures, timeouts, and non-success
/// HTTP statuses all surface as `Error::Http`.
pub async fn fetch_html(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Fetch a URL and extract its article content. The error arm keeps the
/// domain and any title recovered before the failure.
pub async fn fetch_article(url: &str) -> std::result::Result<FetchedArticle, FetchError> {
    let domain = domain_of(url);
    debug!(url, %domain, "fetching article");

    let html = match fetch_html(url, DEFAULT_TIMEOUT).await {
        Ok(html) => html,
        Err(err) => {
            return Err(FetchError {
                url: url.to_string(),
                domain,
                title: String::new(),
                message: format!("Network or HTTP error: {}", err),
            });
        }
    };

    let extracted = extract(&html);
    if extracted.text.is_empty() {
        return Err(FetchError {
            url: url.to_string(),
            domain,
            title: extracted.title,
            message: "Could not extract any meaningful article text from the page.".to_string(),
        });
    }

    Ok(FetchedArticle {
        url: url.to_string(),
        domain,
        title: extracted.title,
        text: extracted.text,
    })
}
