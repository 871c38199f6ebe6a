use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::application::services::duty::DutyService;
use crate::domain::schedule::WeeklySlot;

/// Print this week's duty unit and the next scheduled announcement.
///
/// With `preview`, the announcement is also sent through the service's
/// messenger (the console when run from the CLI).
///
/// # Errors
///
/// Returns an error if the preview cannot be delivered.
pub async fn run_duty(
    service: &DutyService<'_>,
    slot: WeeklySlot,
    now: DateTime<Utc>,
    preview: bool,
) -> anyhow::Result<()> {
    let today = now.date_naive();
    let current = service.unit_for(today);
    let next_at = slot.next_after(now);
    let next_unit = service.unit_for(next_at.date_naive());

    println!(
        "{} {}",
        "This week:".bold(),
        current.to_string().green().bold()
    );
    println!(
        "{} {} {}",
        "Next announcement:".bold(),
        next_at.format("%a %Y-%m-%d %H:%M UTC"),
        format!("({next_unit})").dimmed()
    );

    if preview {
        println!();
        service
            .announce(today)
            .await
            .context("Failed to render the duty announcement")?;
    }
    Ok(())
}
