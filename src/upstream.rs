use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::config::Config;

#[derive(Debug)]
pub struct UpstreamError {
    pub message: String,
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UpstreamError {}

impl From<String> for UpstreamError {
    fn from(s: String) -> Self {
        UpstreamError { message: s }
    }
}

impl From<&str> for UpstreamError {
    fn from(s: &str) -> Self {
        UpstreamError {
            message: s.to_string(),
        }
    }
}

/// What came back from the evaluation API.
#[derive(Debug)]
pub enum UpstreamOutcome {
    /// 201: evaluation created.
    Accepted(Value),
    /// 200: request understood but the evaluation lacks required inputs.
    Incomplete(Value),
    /// Any other status, with its JSON body.
    Rejected { status: u16, body: Value },
    /// No usable response: connect/TLS/timeout failure or a body that is not JSON.
    Transport(UpstreamError),
}

/// Client for the third-party evaluation endpoint.
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    authorization: HeaderValue,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::from(format!("Failed to build HTTP client: {e}")))?;

        let mut authorization = HeaderValue::from_str(&config.credentials.basic_auth())
            .map_err(|e| UpstreamError::from(format!("Invalid credentials header: {e}")))?;
        authorization.set_sensitive(true);

        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            authorization,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `data` to the evaluation endpoint byte for byte as received.
    pub async fn evaluate(&self, data: &RawValue) -> UpstreamOutcome {
        let resp = match self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.clone())
            .body(data.get().to_owned())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return UpstreamOutcome::Transport(UpstreamError::from(format!(
                    "Upstream request failed: {e}"
                )));
            }
        };

        let status = resp.status().as_u16();
        match resp.bytes().await {
            Ok(body) => classify(status, &body),
            Err(e) => UpstreamOutcome::Transport(UpstreamError::from(format!(
                "Failed to read upstream response: {e}"
            ))),
        }
    }
}

/// Map a raw upstream status and body onto an outcome.
pub fn classify(status: u16, body: &[u8]) -> UpstreamOutcome {
    let json = match serde_json::from_slice::<Value>(body) {
        Ok(json) => json,
        Err(e) => {
            return UpstreamOutcome::Transport(UpstreamError::from(format!(
                "Upstream returned {status} with a non-JSON body: {e}"
            )));
        }
    };

    match status {
        201 => UpstreamOutcome::Accepted(json),
        200 => UpstreamOutcome::Incomplete(json),
        _ => UpstreamOutcome::Rejected { status, body: json },
    }
}
