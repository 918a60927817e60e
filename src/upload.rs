//! Upload client
//!
//! Performs one authenticated binary upload per eligible item against the
//! remote profile-picture resource and classifies the result. A single attempt
//! is definitive: there are no retries, and any status other than 200 (as well
//! as any transport failure) is classified as an `Error` outcome.

use crate::config::Config;
use crate::error::Result;
use crate::types::UploadOutcome;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tracing::{debug, warn};

/// HTTP client for the remote profile-picture endpoint
#[derive(Clone)]
pub struct UploadClient {
    client: reqwest::Client,
    base_url: String,
    credential: String,
}

impl UploadClient {
    /// Build a client from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.credential.clone(),
        })
    }

    /// Upload one photo and classify the outcome
    ///
    /// Sends `PUT {base_url}/users/{identifier}/profile-picture` with
    /// `Authorization: Basic {credential}` and a multipart body carrying a
    /// single `file` part (the photo bytes, the display filename, and the
    /// MIME hint). The multipart boundary and content-type header are derived
    /// by reqwest; nothing is overridden.
    ///
    /// Classification:
    /// - status 200 acknowledges the upload: `Success`;
    /// - any other status: `Error`, with the response body as the message,
    ///   `"HTTP {status}"` when the body is empty, or `"unknown error"` when
    ///   the body cannot be read;
    /// - transport failure: `Error` with the transport error's message.
    pub async fn upload(
        &self,
        identifier: &str,
        display_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> UploadOutcome {
        let url = format!("{}/users/{}/profile-picture", self.base_url, identifier);

        let part = match Part::bytes(bytes)
            .file_name(display_name.to_string())
            .mime_str(mime_type)
        {
            Ok(part) => part,
            Err(e) => {
                warn!(identifier, error = %e, "invalid MIME hint for upload");
                return UploadOutcome::failure(identifier, display_name, e.to_string());
            }
        };
        let form = Form::new().part("file", part);

        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, format!("Basic {}", self.credential))
            .multipart(form)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!(identifier, "upload acknowledged");
                UploadOutcome::success(identifier, display_name)
            }
            Ok(response) => {
                let status = response.status();
                let message = match response.text().await {
                    Ok(body) if body.trim().is_empty() => format!("HTTP {}", status.as_u16()),
                    Ok(body) => body,
                    Err(_) => "unknown error".to_string(),
                };
                warn!(identifier, status = status.as_u16(), message = %message, "upload rejected");
                UploadOutcome::failure(identifier, display_name, message)
            }
            Err(e) => {
                warn!(identifier, error = %e, "upload transport failure");
                UploadOutcome::failure(identifier, display_name, e.to_string())
            }
        }
    }
}
