use serde_json::{Map, Value};

use crate::domain::{Account, Delivery, Schedule, User};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

type JsonObject = Map<String, Value>;

pub fn decode_delivery_json_response(json: &str) -> Result<Delivery, TransportError> {
    let parsed: JsonObject = serde_json::from_str(json)?;
    Ok(Delivery::new(parsed))
}

pub fn decode_schedule_json_response(json: &str) -> Result<Schedule, TransportError> {
    let parsed: JsonObject = serde_json::from_str(json)?;
    Ok(Schedule::new(parsed))
}

pub fn decode_schedules_json_response(json: &str) -> Result<Vec<Schedule>, TransportError> {
    let parsed: Vec<JsonObject> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(Schedule::new).collect())
}

pub fn decode_account_json_response(json: &str) -> Result<Account, TransportError> {
    let parsed: JsonObject = serde_json::from_str(json)?;
    Ok(Account::new(parsed))
}

pub fn decode_user_json_response(json: &str) -> Result<User, TransportError> {
    let parsed: JsonObject = serde_json::from_str(json)?;
    Ok(User::new(parsed))
}

pub fn decode_users_json_response(json: &str) -> Result<Vec<User>, TransportError> {
    let parsed: Vec<JsonObject> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(User::new).collect())
}
