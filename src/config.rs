use std::net::IpAddr;
use std::time::Duration;

use crate::credentials::Credentials;

pub const DEFAULT_UPSTREAM_URL: &str = "https://sandbox.alloy.co/v1/evaluations";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub upstream_url: String,
    pub credentials: Credentials,
    /// Outbound deadline. `None` leaves the HTTP client's default in place.
    pub upstream_timeout: Option<Duration>,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let token = required("FORMRELAY_API_TOKEN")?;
        let secret = required("FORMRELAY_API_SECRET")?;

        let host: IpAddr = or("FORMRELAY_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_HOST: {e}"))?;

        let port: u16 = or("FORMRELAY_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_PORT: {e}"))?;

        let upstream_url = or("FORMRELAY_UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
        if !upstream_url.starts_with("http://") && !upstream_url.starts_with("https://") {
            return Err(format!(
                "Invalid FORMRELAY_UPSTREAM_URL: expected an http(s) URL, got '{upstream_url}'"
            ));
        }

        let upstream_timeout = match lookup("FORMRELAY_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid FORMRELAY_UPSTREAM_TIMEOUT_SECS: {e}"))?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let max_body_size: usize = or("FORMRELAY_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_MAX_BODY_SIZE: {e}"))?;

        let log_level = or("FORMRELAY_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            upstream_url,
            credentials: Credentials::new(token, secret),
            upstream_timeout,
            max_body_size,
            log_level,
        })
    }
}
