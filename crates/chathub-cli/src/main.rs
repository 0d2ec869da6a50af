//! ChatHub CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use chathub_core::config::{AppConfig, LoggingConfig};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&logging_config(&cli.config));

    if let Err(e) = cli.execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logging settings from the config file, or defaults when it does not load.
///
/// `config validate` reports load failures itself.
fn logging_config(config_path: &str) -> LoggingConfig {
    AppConfig::load(config_path)
        .map(|config| config.logging)
        .unwrap_or_default()
}

/// Initialize tracing/logging on stderr, leaving stdout to command output
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
