use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

/// Install the fmt subscriber once per process; repeated calls are no-ops.
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .init();
    });
}
