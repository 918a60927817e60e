//! Configuration types
//!
//! There is no configuration file and no persisted state: the embedding
//! application constructs a [`Config`] in code and hands it to
//! [`BatchUploader::new`](crate::BatchUploader::new).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout for uploads
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default buffer size for the batch event broadcast channel
const DEFAULT_EVENT_BUFFER: usize = 1000;

/// Configuration for the batch uploader
///
/// `base_url` and `credential` have no usable defaults and must be supplied
/// by the caller; everything else works out of the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote API, e.g. `https://api.example.com/v1`.
    /// The per-item upload target is `{base_url}/users/{identifier}/profile-picture`.
    pub base_url: String,

    /// Opaque credential sent as `Authorization: Basic {credential}`.
    ///
    /// The credential is never inspected or validated locally; an invalid
    /// credential surfaces as per-item `Error` outcomes from the remote.
    pub credential: String,

    /// Timeout applied to each upload request
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Capacity of the event broadcast channel. Slow subscribers that fall
    /// behind by more than this many events receive a `Lagged` error.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            credential: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config {
                message: "base_url must not be empty".to_string(),
                key: Some("base_url".to_string()),
            });
        }
        if self.event_buffer == 0 {
            return Err(Error::Config {
                message: "event_buffer must be at least 1".to_string(),
                key: Some("event_buffer".to_string()),
            });
        }
        Ok(())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_timeouts() {
        let config = Config::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.event_buffer, 1000);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = Config {
            credential: "dXNlcjpwYXNz".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("base_url")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_event_buffer() {
        let config = Config {
            base_url: "http://localhost:8080".to_string(),
            event_buffer: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_empty_credential() {
        // Credential contents are opaque; an empty one is the remote's problem
        let config = Config {
            base_url: "http://localhost:8080".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
