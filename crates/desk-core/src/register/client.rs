//! HTTP client for the registration backend.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use super::{RegisterError, RegistrationApi, RegistrationReceipt, RegistrationRequest};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    url: String,
    http: reqwest::Client,
}

impl HttpRegistrationClient {
    /// Builds a client posting to `config.registration_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.registration_url, config.request_timeout())
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(url: &str, timeout: Option<std::time::Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            url: url.to_string(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RegistrationApi for HttpRegistrationClient {
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegisterError> {
        tracing::info!(
            url = %self.url,
            username = %request.username,
            role = %request.role,
            "submitting registration"
        );

        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let err = classify_status(status);
            tracing::warn!(status = status.as_u16(), "registration rejected");
            return Err(err);
        }

        let body = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read registration response body");
                String::new()
            }
        };
        tracing::debug!(status = status.as_u16(), %body, "registration accepted");
        Ok(RegistrationReceipt(parse_body(&body)))
    }
}

fn classify_status(status: StatusCode) -> RegisterError {
    if status == StatusCode::CONFLICT {
        RegisterError::UsernameTaken
    } else {
        RegisterError::RegistrationFailed {
            status: status.as_u16(),
        }
    }
}

fn classify_reqwest_error(e: &reqwest::Error) -> RegisterError {
    let message = if e.is_timeout() {
        format!("Request timed out: {e}")
    } else if e.is_connect() {
        format!("Connection failed: {e}")
    } else {
        format!("Network error: {e}")
    };
    tracing::warn!(%message, "registration request failed");
    RegisterError::NoServerResponse { message }
}

/// JSON bodies are kept as-is; anything else becomes a string (or null).
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
