//! Mint credential tokens for development and testing.

use chrono::TimeDelta;
use clap::Args;
use serde::Serialize;

use chathub_auth::JwtEncoder;
use chathub_auth::jwt::IssuedToken;
use chathub_core::config::AppConfig;
use chathub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Display name carried by the token
    pub username: String,

    /// Account identifier (defaults to the username)
    #[arg(long)]
    pub user_id: Option<String>,

    /// Lifetime in hours (defaults to auth.token_ttl_hours)
    #[arg(long)]
    pub ttl_hours: Option<i64>,
}

/// Token output
#[derive(Debug, Serialize)]
struct TokenOutput {
    username: String,
    user_id: String,
    #[serde(flatten)]
    issued: IssuedToken,
}

/// Execute the token command
pub fn execute(args: &TokenArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let issued = mint(&config, args)?;

    match format {
        OutputFormat::Text => {
            println!("{}", issued.token);
            output::print_kv("Expires", &issued.expires_at.to_rfc3339());
        }
        OutputFormat::Json => output::print_item(
            &TokenOutput {
                username: args.username.clone(),
                user_id: user_id(args).to_string(),
                issued,
            },
            format,
        )?,
    }

    Ok(())
}

fn mint(config: &AppConfig, args: &TokenArgs) -> Result<IssuedToken, AppError> {
    let encoder = JwtEncoder::new(&config.auth);
    match args.ttl_hours {
        Some(hours) if hours <= 0 => Err(AppError::validation("--ttl-hours must be positive")),
        Some(hours) => {
            let ttl = TimeDelta::try_hours(hours)
                .ok_or_else(|| AppError::validation("--ttl-hours is out of range"))?;
            encoder.issue_with_ttl(user_id(args), &args.username, ttl)
        }
        None => encoder.issue(user_id(args), &args.username),
    }
}

fn user_id(args: &TokenArgs) -> &str {
    args.user_id.as_deref().unwrap_or(&args.username)
}
