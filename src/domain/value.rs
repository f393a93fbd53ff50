use std::fmt;

use chrono::NaiveDateTime;

use crate::domain::validation::{
    ValidationError, is_valid_destination, is_valid_text, parse_scheduled_date,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Elibom account user name (usually the account e-mail).
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    pub const FIELD: &'static str = "user";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Elibom account password or API token.
///
/// Invariant: must not be empty (whitespace is preserved and allowed). The
/// value is redacted from `Debug` output.
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password for use in an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<REDACTED>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// HTTP Basic credentials sent with every request.
pub struct Credentials {
    user: Username,
    password: Password,
}

impl Credentials {
    /// Create credentials, validating that both parts are non-empty.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user: Username::new(user)?,
            password: Password::new(password)?,
        })
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One or more comma separated message targets.
///
/// Each token is a phone number of at least 10 digits, a contact (`c<id>`) or a
/// group (`g<id>`). The value is sent to the API exactly as given.
pub struct Destination(String);

impl Destination {
    /// JSON field name used by Elibom (`destination`).
    pub const FIELD: &'static str = "destination";

    /// Create a validated [`Destination`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_destination(Some(&value)) {
            return Err(ValidationError::InvalidDestination);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by Elibom (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_text(Some(&value)) {
            return Err(ValidationError::InvalidText);
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery instant of a scheduled message (`scheduledDate`).
///
/// Invariants: formatted exactly as `yyyy-MM-dd HH:mm` and strictly after the
/// `now` it was validated against. Both are checked, format first.
pub struct ScheduledDate(String);

impl ScheduledDate {
    /// JSON field name used by Elibom (`scheduledDate`).
    pub const FIELD: &'static str = "scheduledDate";

    /// Create a validated [`ScheduledDate`] relative to `now`.
    pub fn new(value: impl Into<String>, now: NaiveDateTime) -> Result<Self, ValidationError> {
        let value = value.into();
        let parsed = parse_scheduled_date(&value).ok_or(ValidationError::InvalidDateFormat)?;
        if parsed <= now {
            return Err(ValidationError::InvalidDateRange);
        }
        Ok(Self(value))
    }

    /// The date as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Delivery token returned by `send_message`.
///
/// Invariant: not blank. Kept exactly as given and never interpreted by the client.
pub struct DeliveryToken(String);

impl DeliveryToken {
    /// JSON field name used by Elibom (`deliveryToken`).
    pub const FIELD: &'static str = "deliveryToken";

    /// Create a validated [`DeliveryToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for DeliveryToken {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DeliveryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Schedule id returned by `schedule_message`.
///
/// Invariant: not blank. Kept exactly as given.
pub struct ScheduleId(String);

impl ScheduleId {
    /// JSON field name used by Elibom (`scheduleId`).
    pub const FIELD: &'static str = "scheduleId";

    /// Create a validated [`ScheduleId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated schedule id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ScheduleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Id of a user that belongs to the account.
pub struct UserId(String);

impl UserId {
    pub const FIELD: &'static str = "id";

    /// Create a validated [`UserId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
