use serde_json::{Map, Value};

use crate::domain::value::UserId;

#[derive(Debug, Clone, PartialEq, Default)]
/// Delivery details as returned by `GET messages/{deliveryToken}`.
///
/// Fields are passed through untouched, including ones this crate does not know about.
pub struct Delivery {
    fields: Map<String, Value>,
}

impl Delivery {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Scheduled delivery as returned by `GET schedules/{scheduleId}` and `GET schedules/scheduled`.
pub struct Schedule {
    fields: Map<String, Value>,
}

impl Schedule {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Account details as returned by `GET account`.
pub struct Account {
    fields: Map<String, Value>,
}

impl Account {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Account user as returned by `GET users/{userId}` and `GET users`.
pub struct User {
    fields: Map<String, Value>,
}

impl User {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The user's `id`, when it is a non-empty string or an unsigned number.
    pub fn id(&self) -> Option<UserId> {
        match self.fields.get(UserId::FIELD)? {
            Value::String(value) => UserId::new(value.as_str()).ok(),
            Value::Number(value) => value.as_u64().map(UserId::from),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}
