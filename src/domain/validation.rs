use std::fmt;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// `chrono` format of a scheduled date (`yyyy-MM-dd HH:mm`, 24-hour clock).
pub const SCHEDULED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

static GROUP_OR_CONTACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[cg][0-9]+$").expect("static regex"));
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,}$").expect("static regex"));
// chrono accepts unpadded fields, so the exact shape is checked first.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}$").expect("static regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidDestination,
    InvalidText,
    InvalidDateFormat,
    InvalidDateRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidDestination => write!(
                f,
                "Invalid destination, cannot be empty, and must be comma separated numbers of at least 10 digits, contacts (c#) or groups (g#)"
            ),
            Self::InvalidText => write!(f, "Invalid text, cannot be empty"),
            Self::InvalidDateFormat => {
                write!(f, "Invalid scheduled date format, the format must be yyyy-mm-dd hh:mm")
            }
            Self::InvalidDateRange => write!(f, "Invalid scheduled date, cannot be in the past"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a comma separated destination list.
///
/// Every trimmed token must be a contact (`c<digits>`), a group (`g<digits>`)
/// or a phone number of at least 10 digits. `None` and empty tokens fail.
pub fn is_valid_destination(destination: Option<&str>) -> bool {
    let Some(destination) = destination else {
        return false;
    };
    destination.split(',').map(str::trim).all(|token| {
        GROUP_OR_CONTACT.is_match(token) || PHONE_NUMBER.is_match(token)
    })
}

/// Message text must be present and non-empty after trimming.
pub fn is_valid_text(text: Option<&str>) -> bool {
    text.is_some_and(|text| !text.trim().is_empty())
}

/// Check that `date` is exactly `yyyy-MM-dd HH:mm` and names a real calendar instant.
pub fn is_valid_date(date: &str) -> bool {
    parse_scheduled_date(date).is_some()
}

/// Check that `date` parses and lies strictly after `now`.
pub fn is_future_date(date: &str, now: NaiveDateTime) -> bool {
    parse_scheduled_date(date).is_some_and(|parsed| parsed > now)
}

pub(crate) fn parse_scheduled_date(date: &str) -> Option<NaiveDateTime> {
    if !DATE_SHAPE.is_match(date) {
        return None;
    }
    NaiveDateTime::parse_from_str(date, SCHEDULED_DATE_FORMAT).ok()
}
