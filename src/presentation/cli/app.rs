use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// saunabot — sauna temperature watcher for a Telegram group
///
/// Polls the sauna temperature feed, tells the group when the sauna is hot,
/// answers `/sauna` and announces the weekly duty rotation.
#[derive(Parser, Debug)]
#[command(name = "saunabot")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot until Ctrl+C
    #[command(alias = "r")]
    Run {
        /// Print outgoing messages instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the current sauna temperature
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this week's duty unit and the next announcement
    #[command(alias = "d")]
    Duty {
        /// Also print the announcement text
        #[arg(long)]
        preview: bool,
    },

    /// Show the effective configuration
    #[command(alias = "c")]
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}
