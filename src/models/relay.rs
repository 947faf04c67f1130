use serde::Serialize;

pub const MSG_ACCEPTED: &str = "Data received successfully!";
pub const MSG_INCOMPLETE: &str = "Data received but evaluation missing required inputs!";
pub const MSG_REJECTED: &str = "Data received but external API call failed.";
pub const MSG_TRANSPORT: &str = "Error during external API call.";

/// Body returned by `POST /api/submit`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelayResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl RelayResponse {
    pub fn with_data(message: &str, external_data: serde_json::Value) -> Self {
        Self {
            message: message.to_string(),
            external_data: Some(external_data),
            status_code: None,
        }
    }

    pub fn with_status(message: &str, status_code: u16) -> Self {
        Self {
            message: message.to_string(),
            external_data: None,
            status_code: Some(status_code),
        }
    }

    pub fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            external_data: None,
            status_code: None,
        }
    }
}
