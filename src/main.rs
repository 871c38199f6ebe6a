use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use saunabot::application::config::AppConfig;
use saunabot::application::services::duty::DutyService;
use saunabot::application::services::poller::PollerService;
use saunabot::application::services::reader::FeedReader;
use saunabot::domain::ports::messenger::Messenger;
use saunabot::domain::rules::{AlertGate, AlertState, TrendEvaluator};
use saunabot::domain::value_objects::AlertThresholds;
use saunabot::infrastructure::feed::HttpFeedFetcher;
use saunabot::infrastructure::messaging::{ConsoleMessenger, TelegramClient};
use saunabot::presentation::bot::{CommandDispatcher, UpdateListener};
use saunabot::presentation::cli::app::{Cli, Commands};
use saunabot::presentation::cli::commands::config::run_config;
use saunabot::presentation::cli::commands::daemon::{run_daemon, DutySchedule};
use saunabot::presentation::cli::commands::duty::run_duty;
use saunabot::presentation::cli::commands::status::run_status;

/// Destination label used when messages only go to the terminal.
const CONSOLE_DESTINATION: &str = "console";

fn print_banner(dry_run: bool) {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  saunabot — Sauna Watcher".bold().cyan());
    if dry_run {
        println!("{}", "  dry run: messages are printed only".yellow());
    }
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_feed_source(config: &AppConfig) -> anyhow::Result<HttpFeedFetcher> {
    HttpFeedFetcher::new(config.feed.url.clone(), config.feed_timeout())
        .context("Failed to set up the feed client")
}

/// Poll loop, duty announcements and (optionally) command listener.
async fn serve(
    config: &AppConfig,
    reader: &FeedReader<'_>,
    messenger: &dyn Messenger,
    destination: &str,
    listener: Option<&UpdateListener<'_>>,
) -> anyhow::Result<()> {
    let state = AlertState::new();
    let poller = PollerService::new(
        reader,
        AlertGate::new(AlertThresholds::from(&config.alerts)),
        &state,
        messenger,
        destination,
    );

    let duty_service = if config.duty.enabled {
        Some(DutyService::new(
            config.duty_rotation()?,
            messenger,
            destination,
        ))
    } else {
        None
    };
    let duty = match &duty_service {
        Some(service) => Some(DutySchedule {
            service,
            slot: config.duty_slot()?,
        }),
        None => None,
    };

    run_daemon(&poller, config.poll_interval(), duty, listener).await
}

async fn run_bot(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")?;

    let fetcher = build_feed_source(config)?;
    let reader = FeedReader::new(
        &fetcher,
        config.feed.format,
        TrendEvaluator::new(config.stale_after()),
    );
    tracing::info!("Feed: {} ({})", config.feed.url, config.feed.format);

    print_banner(dry_run);

    if dry_run {
        let console = ConsoleMessenger::new();
        return serve(config, &reader, &console, CONSOLE_DESTINATION, None).await;
    }

    let credentials = config
        .telegram_credentials()
        .context("Cannot start the bot")?;
    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        &credentials.bot_token,
        config.telegram_timeout(),
        config.long_poll(),
    )
    .context("Failed to set up the Telegram client")?;
    let dispatcher = CommandDispatcher::new(&reader, &telegram);
    let listener = UpdateListener::new(&telegram, &dispatcher);

    serve(
        config,
        &reader,
        &telegram,
        &credentials.chat_id,
        Some(&listener),
    )
    .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let path: PathBuf = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_or_create(&path)?.with_env_overrides();

    // Manual DI: only main.rs knows the concrete adapters
    match cli.command {
        Some(Commands::Run { dry_run }) => run_bot(&config, dry_run).await?,
        None => run_bot(&config, false).await?,
        Some(Commands::Status { json }) => {
            config.validate().context("Invalid configuration")?;
            let fetcher = build_feed_source(&config)?;
            let reader = FeedReader::new(
                &fetcher,
                config.feed.format,
                TrendEvaluator::new(config.stale_after()),
            );
            run_status(
                &reader,
                AlertThresholds::from(&config.alerts),
                Utc::now(),
                json,
            )
            .await?;
        }
        Some(Commands::Duty { preview }) => {
            let console = ConsoleMessenger::new();
            let service = DutyService::new(config.duty_rotation()?, &console, CONSOLE_DESTINATION);
            run_duty(&service, config.duty_slot()?, Utc::now(), preview).await?;
        }
        Some(Commands::Config { path: path_only }) => {
            run_config(&config, &path, path_only)?;
        }
    }

    Ok(())
}
