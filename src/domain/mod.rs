//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{ScheduleMessage, SendMessage};
pub use response::{Account, Delivery, Schedule, User};
pub use validation::{
    SCHEDULED_DATE_FORMAT, ValidationError, is_future_date, is_valid_date, is_valid_destination,
    is_valid_text,
};
pub use value::{
    Credentials, DeliveryToken, Destination, MessageText, Password, ScheduleId, ScheduledDate,
    UserId, Username,
};
