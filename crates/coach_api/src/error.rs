use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

/// Fallback shown when a response parses but carries no usable field and no
/// server-provided error message.
pub const INVALID_RESPONSE_MESSAGE: &str = "Resposta inválida da API.";

#[derive(Debug)]
pub enum CoachApiError {
    InvalidBaseUrl(String),
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    /// Response parsed but the endpoint's expected field was absent.
    MissingData {
        endpoint: &'static str,
        message: String,
    },
}

impl CoachApiError {
    #[must_use]
    pub fn missing_data(endpoint: &'static str, server_error: Option<String>) -> Self {
        let message = server_error
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| INVALID_RESPONSE_MESSAGE.to_string());
        Self::MissingData { endpoint, message }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: Option<String>,
    #[allow(dead_code)]
    pub ok: Option<bool>,
}

impl fmt::Display for CoachApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(value) => write!(f, "invalid header: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::MissingData { endpoint, message } => {
                write!(f, "missing data from {endpoint}: {message}")
            }
        }
    }
}

impl std::error::Error for CoachApiError {}

impl From<reqwest::Error> for CoachApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for CoachApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extracts a user-presentable message from a non-success response body.
///
/// Structured bodies are `{"error": "...", "ok": false}`; anything else is
/// passed through, and an empty body falls back to the status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = payload
            .error
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            return message.to_string();
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
