use std::sync::Arc;

use nd_core::SummaryModel;

use crate::Config;

pub mod dummy;
pub mod hosted;

pub use dummy::DummyModel;
pub use hosted::HostedModel;

/// Build a model from config: the hosted backend when an endpoint is
/// configured, the offline dummy otherwise.
pub fn create_model(config: &Config) -> Arc<dyn SummaryModel> {
    if config.use_dummy || config.endpoint.is_none() {
        Arc::new(DummyModel::new())
    } else {
        Arc::new(HostedModel::new(config.clone()))
    }
}
