use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::application::config::AppConfig;

const REDACTED: &str = "<redacted>";

/// Print the config file path and the effective configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig, path: &Path, path_only: bool) -> anyhow::Result<()> {
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("{} {}", "Config file:".bold(), path.display());
    if config.telegram_credentials().is_err() {
        println!(
            "{}",
            "Telegram credentials missing: set BOT_TOKEN and GROUP_ID".yellow()
        );
    }
    println!();
    print!("{}", render_effective(config)?);
    Ok(())
}

/// Effective configuration as TOML, with the bot token masked.
///
/// # Errors
///
/// Returns an error if TOML serialization fails.
pub fn render_effective(config: &AppConfig) -> anyhow::Result<String> {
    let mut shown = config.clone();
    if shown.telegram.bot_token.is_some() {
        shown.telegram.bot_token = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown).context("Failed to serialize config")
}
