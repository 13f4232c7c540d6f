pub mod extract;
pub mod fetcher;

pub use extract::{extract, Extracted};
pub use fetcher::{fetch_article, fetch_html, DEFAULT_TIMEOUT};
