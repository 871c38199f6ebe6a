//! Weekly duty rotation ("nakkikämppä" turn) arithmetic.

use std::num::NonZeroU32;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Highest unit number that belongs to the `A` staircase.
const LAST_A_UNIT: u32 = 9;

/// Housing unit on duty for a given week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DutyUnit {
    pub number: u32,
}

impl std::fmt::Display for DutyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.number <= LAST_A_UNIT {
            write!(f, "A{}", self.number)
        } else {
            write!(f, "B{}", self.number)
        }
    }
}

/// Round-robin over `cycle_len` units, advancing every Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyRotation {
    start: NaiveDate,
    offset: i64,
    cycle_len: NonZeroU32,
}

impl DutyRotation {
    /// `offset` is the zero-based unit on duty during the week of `start`.
    #[must_use]
    pub const fn new(start: NaiveDate, offset: i64, cycle_len: NonZeroU32) -> Self {
        Self {
            start,
            offset,
            cycle_len,
        }
    }

    #[must_use]
    pub fn unit_for(&self, date: NaiveDate) -> DutyUnit {
        let weeks = (monday_of(date) - monday_of(self.start)).num_weeks();
        let slot = (weeks + self.offset).rem_euclid(i64::from(self.cycle_len.get()));
        // rem_euclid keeps the slot in 0..cycle_len, which fits in u32.
        let number = u32::try_from(slot).unwrap_or(0) + 1;
        DutyUnit { number }
    }
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
