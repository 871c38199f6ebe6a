use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

/// A fixed weekday and time of day, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySlot {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl WeeklySlot {
    #[must_use]
    pub const fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    /// First instant strictly after `now` that falls on this slot.
    #[must_use]
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let days_ahead = (7 + self.weekday.num_days_from_monday()
            - today.weekday().num_days_from_monday())
            % 7;
        let candidate = (today + Duration::days(i64::from(days_ahead)))
            .and_time(self.time)
            .and_utc();
        if candidate > now {
            candidate
        } else {
            candidate + Duration::weeks(1)
        }
    }
}
