use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;
use crate::domain::value::{Destination, MessageText, ScheduledDate};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immediate message delivery (`POST messages`).
pub struct SendMessage {
    destination: Destination,
    text: MessageText,
}

impl SendMessage {
    /// Validate destination, then text.
    pub fn new(destination: &str, text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            destination: Destination::new(destination)?,
            text: MessageText::new(text)?,
        })
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Deferred message delivery (`POST messages` with `scheduledDate`).
pub struct ScheduleMessage {
    destination: Destination,
    text: MessageText,
    scheduled_date: ScheduledDate,
}

impl ScheduleMessage {
    /// Validate destination, text, date format and date range, in that order.
    pub fn new(
        destination: &str,
        text: &str,
        scheduled_date: &str,
        now: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            destination: Destination::new(destination)?,
            text: MessageText::new(text)?,
            scheduled_date: ScheduledDate::new(scheduled_date, now)?,
        })
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn scheduled_date(&self) -> &ScheduledDate {
        &self.scheduled_date
    }
}
