use chrono::NaiveDate;

use crate::application::messages;
use crate::domain::ports::messenger::{DeliveryError, Messenger};
use crate::domain::rotation::{DutyRotation, DutyUnit};
use crate::domain::value_objects::ParseMode;

/// Announces the weekly duty unit to the group.
pub struct DutyService<'a> {
    rotation: DutyRotation,
    messenger: &'a dyn Messenger,
    destination: &'a str,
}

impl<'a> DutyService<'a> {
    #[must_use]
    pub const fn new(rotation: DutyRotation, messenger: &'a dyn Messenger, destination: &'a str) -> Self {
        Self {
            rotation,
            messenger,
            destination,
        }
    }

    #[must_use]
    pub fn unit_for(&self, date: NaiveDate) -> DutyUnit {
        self.rotation.unit_for(date)
    }

    /// Send the announcement for the week containing `today`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message cannot be delivered.
    pub async fn announce(&self, today: NaiveDate) -> Result<DutyUnit, DeliveryError> {
        let unit = self.unit_for(today);
        self.messenger
            .send_message(
                self.destination,
                &messages::duty_announcement(unit),
                ParseMode::Html,
            )
            .await?;
        tracing::info!("Duty announcement sent: {unit}");
        Ok(unit)
    }
}
