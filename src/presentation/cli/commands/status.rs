use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::application::services::reader::FeedReader;
use crate::domain::entities::reading::TrendResult;
use crate::domain::value_objects::AlertThresholds;
use crate::presentation::cli::formatters::reading_fmt::{
    colorize_temperature, format_age, print_section_header, temperature_bar, trend_label,
};

/// # Errors
///
/// Returns an error if the feed cannot be read or JSON serialization fails.
pub async fn run_status(
    reader: &FeedReader<'_>,
    thresholds: AlertThresholds,
    now: DateTime<Utc>,
    json: bool,
) -> anyhow::Result<()> {
    let reading = reader
        .read(now)
        .await
        .context("Could not read the sauna temperature")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    print_reading(&reading, thresholds);
    Ok(())
}

fn print_reading(reading: &TrendResult, thresholds: AlertThresholds) {
    println!("{}", "saunabot — Sauna Status".bold().cyan());
    println!("{}", "━".repeat(50));

    print_section_header("\n🌡️  Temperature");
    println!(
        "  {} {}",
        temperature_bar(reading.latest_value, thresholds, 30),
        colorize_temperature(reading.latest_value, thresholds)
    );
    println!(
        "  Trend: {} ({:+.1}°C)",
        trend_label(reading.trend),
        reading.delta
    );
    if reading.latest_value > thresholds.hot {
        println!(
            "  {}",
            format!("Above {:.0}°C, the sauna is hot", thresholds.hot)
                .red()
                .bold()
        );
    }

    print_section_header("\n📡 Feed");
    println!(
        "  Latest sample: {} (age {})",
        reading.latest_at.format("%Y-%m-%d %H:%M:%S UTC"),
        format_age(reading.age_minutes)
    );
    if reading.is_stale {
        println!(
            "  {}",
            "Feed is stale: no hot notification will be sent"
                .yellow()
                .bold()
        );
    }
}
