//! Logging setup for the demo binary.
//!
//! Without `RUST_LOG`, the configured level applies to the emitter library and
//! to this binary while everything else stays at `warn`.

use crate::config::LoggingSettings;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    format!(
        "warn,{}={level},{}={level}",
        priority_events::LOG_TARGET,
        env!("CARGO_CRATE_NAME")
    )
}

/// Installs the global subscriber.
///
/// `json_format` forces JSON output regardless of the config file. Fails if a
/// subscriber is already installed.
pub fn setup_logging(
    config: &LoggingSettings,
    json_format: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let directives = default_directives(&config.level);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&directives)?,
    };

    let json = json_format || config.json_format;
    let json_layer = json.then(|| fmt::layer().json().with_target(true).with_current_span(false));
    let text_layer = (!json).then(|| fmt::layer().with_ansi(true).with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    info!("🔧 Logging initialized ({})", directives);
    Ok(())
}
