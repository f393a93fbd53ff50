use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;

use crate::domain::{DeliveryToken, ScheduleId, ScheduleMessage, SendMessage, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing field: {field}")]
    MissingField { field: &'static str },

    #[error("response field {field} must be a JSON string or number")]
    UnexpectedType { field: &'static str },

    #[error("response field {field} is invalid: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
}

// Ids stay raw so numeric tokens wider than `u64`/`f64` survive untouched.
#[derive(Debug, Deserialize)]
struct SendMessageJsonResponse {
    #[serde(rename = "deliveryToken", default)]
    delivery_token: Option<Box<RawValue>>,
}

#[derive(Debug, Deserialize)]
struct ScheduleMessageJsonResponse {
    #[serde(rename = "scheduleId", default)]
    schedule_id: Option<Box<RawValue>>,
}

pub fn encode_send_message_body(request: &SendMessage) -> String {
    json!({
        "destination": request.destination().as_str(),
        "text": request.text().as_str(),
    })
    .to_string()
}

pub fn encode_schedule_message_body(request: &ScheduleMessage) -> String {
    json!({
        "destination": request.destination().as_str(),
        "text": request.text().as_str(),
        "scheduledDate": request.scheduled_date().as_str(),
    })
    .to_string()
}

pub fn decode_send_message_json_response(json: &str) -> Result<DeliveryToken, TransportError> {
    let parsed: SendMessageJsonResponse = serde_json::from_str(json)?;
    let raw = id_token(DeliveryToken::FIELD, parsed.delivery_token)?;
    DeliveryToken::new(raw).map_err(|source| TransportError::InvalidField {
        field: DeliveryToken::FIELD,
        source,
    })
}

pub fn decode_schedule_message_json_response(json: &str) -> Result<ScheduleId, TransportError> {
    let parsed: ScheduleMessageJsonResponse = serde_json::from_str(json)?;
    let raw = id_token(ScheduleId::FIELD, parsed.schedule_id)?;
    ScheduleId::new(raw).map_err(|source| TransportError::InvalidField {
        field: ScheduleId::FIELD,
        source,
    })
}

fn id_token(field: &'static str, raw: Option<Box<RawValue>>) -> Result<String, TransportError> {
    let raw = raw.ok_or(TransportError::MissingField { field })?;
    let token = raw.get();
    match token.as_bytes().first() {
        Some(b'"') => Ok(serde_json::from_str::<String>(token)?),
        Some(b'-' | b'0'..=b'9') => Ok(token.to_owned()),
        _ => Err(TransportError::UnexpectedType { field }),
    }
}
