use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tablero_core::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level; output goes to stderr so stdout stays clean for JSON.
pub fn init(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
}
