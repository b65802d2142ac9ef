//! Tracing subscriber set-up shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppInfo;

/// Install the global subscriber. `RUST_LOG` wins over `LOG_LEVEL`.
pub fn init_tracing(app: &AppInfo) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| app.log_filter().into());

    // A second call (tests, combined binary) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    tracing::info!(app = %app.name, version = %app.version, "Starting");
}
