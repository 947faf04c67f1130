use chrono::{DateTime, Utc};
use serde_json::value::RawValue;
use uuid::Uuid;

/// A form document as received from the client, kept as its original JSON text.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub data: Box<RawValue>,
    pub received_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(data: Box<RawValue>) -> Self {
        Self {
            id: Uuid::now_v7(),
            data,
            received_at: Utc::now(),
        }
    }
}
