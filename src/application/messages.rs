//! User-facing chat texts (Finnish, like the group itself).

use std::fmt::Write;

use crate::application::services::reader::ReadError;
use crate::domain::entities::reading::{Trend, TrendResult};
use crate::domain::rotation::DutyUnit;

const FETCH_FAILED: &str = "Lämpötilaa ei saatu haettua!";
const BAD_DATA: &str = "Datassa ongelma";

const DUTY_CHECKLIST: &str = "Ohje:
- Selvitä kaljatilanne
- Pese vieraspyyhkeet
- Osta pyykin- ja astianpesuainetta
- Osta vessapaperia ja käsisaippuaa
- Tyhjennä roskikset ja osta pusseja
- Pahvit/Lasit/Metallit keräyksiin
- Tölkit kauppaan";

/// One-shot "sauna is hot" announcement.
#[must_use]
pub fn hot_alert(hot_threshold: f64) -> String {
    format!("Saunassa ompi yli {hot_threshold:.0}C")
}

const fn trend_word(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => "nouseva",
        Trend::Falling => "laskeva",
        Trend::Flat => "tasainen",
    }
}

/// Reply to the `/sauna` command.
#[must_use]
pub fn reading_reply(reading: &TrendResult) -> String {
    let mut text = format!(
        "Saunan lämpötila on {:.1}°C {}",
        reading.latest_value,
        trend_word(reading.trend)
    );
    if reading.is_stale {
        let _ = write!(
            text,
            "\n(Huom: viimeisin mittaus {} min takaa, data ei päivity)",
            reading.age_minutes
        );
    }
    text
}

/// Reply when no reading could be produced.
#[must_use]
pub const fn failure_reply(error: &ReadError) -> &'static str {
    match error {
        ReadError::Fetch(_) => FETCH_FAILED,
        ReadError::Parse(_) => BAD_DATA,
    }
}

/// Weekly duty announcement, HTML markup.
#[must_use]
pub fn duty_announcement(unit: DutyUnit) -> String {
    format!("<b>{unit} Nakkikämppävuoro</b>\n\n{DUTY_CHECKLIST}")
}
