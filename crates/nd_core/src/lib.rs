pub mod error;
pub mod models;
pub mod text;
pub mod types;

pub use error::Error;
pub use models::{SummarizeOptions, SummaryModel};
pub use types::{FetchError, FetchedArticle};

pub type Result<T> = std::result::Result<T, Error>;
