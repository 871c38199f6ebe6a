use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::application::services::duty::DutyService;
use crate::application::services::poller::PollerService;
use crate::application::services::reader::ReadError;
use crate::domain::schedule::WeeklySlot;
use crate::presentation::bot::listener::UpdateListener;

/// Weekly duty announcement: what to send and when.
pub struct DutySchedule<'a> {
    pub service: &'a DutyService<'a>,
    pub slot: WeeklySlot,
}

/// Run the bot until Ctrl+C.
///
/// The feed poll, the weekly duty announcement and the command listener run
/// concurrently on this task. Failures inside any of them are logged and the
/// loop carries on; only a failure to install the signal handler is returned.
/// SIGTERM is not handled.
///
/// # Errors
///
/// Returns an error if the Ctrl+C handler cannot be installed.
pub async fn run_daemon(
    poller: &PollerService<'_>,
    poll_interval: Duration,
    duty: Option<DutySchedule<'_>>,
    listener: Option<&UpdateListener<'_>>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Bot started (poll every {}s, duty announcements {}, commands {})",
        poll_interval.as_secs(),
        if duty.is_some() { "on" } else { "off" },
        if listener.is_some() { "on" } else { "off" }
    );

    let announcements = async {
        match duty {
            Some(schedule) => duty_loop(&schedule).await,
            None => std::future::pending().await,
        }
    };
    let commands = async {
        match listener {
            Some(listener) => listener.run().await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        () = poll_loop(poller, poll_interval) => {}
        () = announcements => {}
        () = commands => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            tracing::info!("Shutdown signal received");
            println!("\nStopping saunabot...");
        }
    }
    Ok(())
}

async fn poll_loop(poller: &PollerService<'_>, poll_interval: Duration) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        match poller.run_once(Utc::now()).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Poll: {:.1}°C {} ({}), decision {}",
                    outcome.reading.latest_value,
                    outcome.reading.trend,
                    if outcome.reading.is_stale { "stale" } else { "fresh" },
                    outcome.decision
                );
            }
            Err(ReadError::Fetch(e)) => tracing::warn!("Poll skipped, fetch failed: {e}"),
            Err(ReadError::Parse(e)) => tracing::warn!("Poll skipped, feed unusable: {e}"),
        }
    }
}

async fn duty_loop(schedule: &DutySchedule<'_>) {
    let mut last_announced = None;
    loop {
        let (next_at, wait) = next_wait(schedule.slot, Utc::now(), last_announced);
        tracing::info!(
            "Next duty announcement at {next_at} ({})",
            schedule.service.unit_for(next_at.date_naive())
        );
        tokio::time::sleep(wait).await;

        if let Err(e) = schedule.service.announce(next_at.date_naive()).await {
            tracing::warn!("Duty announcement failed: {e}");
        }
        last_announced = Some(next_at);
    }
}

/// Next slot instant and how long to sleep until it.
///
/// The slot is searched from the later of `now` and the last announced
/// slot, so a wall clock stepped backwards never repeats an announcement.
fn next_wait(
    slot: WeeklySlot,
    now: DateTime<Utc>,
    last_announced: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, Duration) {
    let from = last_announced.map_or(now, |last| now.max(last));
    let next_at = slot.next_after(from);
    let wait = (next_at - now).to_std().unwrap_or(Duration::ZERO);
    (next_at, wait)
}
