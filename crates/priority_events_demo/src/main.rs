//! # Priority Events Demo - Main Entry Point
//!
//! Runs an order pipeline through the priority event emitter and prints a
//! JSON report of what happened.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with default configuration
//! priority-events-demo
//!
//! # Specify custom configuration
//! priority-events-demo --config custom.toml
//!
//! # Override specific settings
//! priority-events-demo --orders 40 --max-listeners 0 --log-level debug
//! ```
//!
//! The configuration file (default: `priority-events.toml`) is created with
//! default values if it doesn't exist.

use tracing::{error, info};

mod cli;
mod config;
mod demo;
mod logging;

use cli::CliArgs;
use config::AppConfig;

/// Parses arguments, loads and validates configuration, sets up logging,
/// then runs the scenario.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = AppConfig::load_from_file(&args.config_path)?;

    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }
    if let Some(max_listeners) = args.max_listeners {
        config.emitter.max_listeners = max_listeners;
    }
    if let Some(orders) = args.orders {
        config.demo.orders = orders;
    }

    config.validate()?;
    logging::setup_logging(&config.logging, args.json_logs)?;

    info!("🔧 Configuration loaded from {}", args.config_path.display());

    match demo::run(&config.demo, &config.emitter) {
        Ok(report) => {
            info!(
                "✅ Processed {} orders ({} accepted, {} rejected)",
                report.orders_emitted, report.orders_accepted, report.orders_rejected
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!("❌ Demo failed: {}", e);
            Err(e.into())
        }
    }
}
