//! CLI command definitions and dispatch.

pub mod config;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use chathub_core::config::AppConfig;
use chathub_core::error::AppError;

use crate::output::OutputFormat;

/// ChatHub: real-time chat hub
#[derive(Debug, Parser)]
#[command(name = "chathub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "CHATHUB_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the ChatHub server
    Serve(serve::ServeArgs),
    /// Mint a signed credential token
    Token(token::TokenArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Token(args) => token::execute(args, &self.config, self.format),
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["chathub", "serve", "--port", "9000", "--host", "127.0.0.1"])
            .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_token_with_json_output() {
        let cli = Cli::try_parse_from([
            "chathub", "--format", "json", "token", "alice", "--user-id", "42", "--ttl-hours", "2",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Token(args) => {
                assert_eq!(args.username, "alice");
                assert_eq!(args.user_id.as_deref(), Some("42"));
                assert_eq!(args.ttl_hours, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_token_requires_username() {
        assert!(Cli::try_parse_from(["chathub", "token"]).is_err());
    }
}
