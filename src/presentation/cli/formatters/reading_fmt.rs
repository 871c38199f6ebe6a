use colored::{ColoredString, Colorize};

use crate::domain::entities::reading::Trend;
use crate::domain::value_objects::AlertThresholds;

/// Upper end of the gauge scale (°C)
const GAUGE_MAX: f64 = 100.0;

#[must_use]
pub fn temperature_bar(value: f64, thresholds: AlertThresholds, width: usize) -> String {
    let ratio = (value / GAUGE_MAX).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if value > thresholds.hot {
        bar_filled.red().bold()
    } else if value >= thresholds.reset {
        bar_filled.yellow()
    } else {
        bar_filled.blue()
    };

    format!("{colored_bar}{bar_empty}")
}

#[must_use]
pub fn colorize_temperature(value: f64, thresholds: AlertThresholds) -> ColoredString {
    let text = format!("{value:.1}°C");
    if value > thresholds.hot {
        text.red().bold()
    } else if value >= thresholds.reset {
        text.yellow()
    } else {
        text.blue()
    }
}

#[must_use]
pub fn trend_label(trend: Trend) -> ColoredString {
    match trend {
        Trend::Rising => "↑ rising".red(),
        Trend::Falling => "↓ falling".cyan(),
        Trend::Flat => "→ flat".normal(),
    }
}

/// `42 min`, `3 h 5 min`, or `in the future` for clock skew.
#[must_use]
pub fn format_age(minutes: i64) -> String {
    match minutes {
        m if m < 0 => "in the future".to_string(),
        m if m < 60 => format!("{m} min"),
        m => format!("{} h {} min", m / 60, m % 60),
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
