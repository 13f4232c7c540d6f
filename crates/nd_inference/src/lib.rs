use std::sync::Arc;

use nd_core::SummaryModel;
use once_cell::sync::OnceCell;

pub mod models;

pub use models::{create_model, DummyModel, HostedModel};

/// Connection settings for the summarization backend. With no endpoint
/// configured (or `use_dummy` set) the offline dummy model is used.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub model_name: Option<String>,
    pub api_key: Option<String>,
    pub use_dummy: bool,
}

static MODEL: OnceCell<Arc<dyn SummaryModel>> = OnceCell::new();

/// Process-wide model handle. The first caller pays the construction cost;
/// every later caller gets the same instance. Safe under concurrent first
/// use: the cell guarantees at most one initialization, and the config of
/// the first caller wins.
pub fn global_model(config: &Config) -> Arc<dyn SummaryModel> {
    MODEL.get_or_init(|| create_model(config)).clone()
}
