//! Typed Rust client for the Elibom SMS HTTP API.
//!
//! The crate is split in three layers: a domain layer of validated types, a
//! transport layer for the JSON wire format, and a small client layer that
//! validates arguments, issues one HTTP request per call and maps HTTP status
//! codes to [`ElibomError`].
//!
//! ```rust,no_run
//! use elibom::{Credentials, ElibomClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ElibomClient::new(Credentials::new("me@example.com", "api-token")?);
//!     let token = client.send_message("573017897304", "hello").await?;
//!     let delivery = client.show_delivery(&token).await?;
//!     println!("{:?}", delivery.get("status"));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxError, BoxFuture, ElibomClient, ElibomClientBuilder, ElibomError, HttpMethod, HttpRequest,
    HttpResponse, HttpTransport, ReqwestTransport, error_for_status,
};
pub use domain::{
    Account, Credentials, Delivery, DeliveryToken, Destination, MessageText, ScheduleId,
    ScheduleMessage, ScheduledDate, Schedule, SendMessage, User, UserId, ValidationError,
    is_future_date, is_valid_date, is_valid_destination, is_valid_text,
};
