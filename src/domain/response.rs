use serde::Deserialize;
use serde_json::{Map, Value};

/// Response exactly as the transport received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Error reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ErrorInfo {
    /// Human-readable message including the remote error text and status.
    pub message: String,
    /// HTTP status of the response, when one was received.
    pub status_code: Option<u16>,
    /// Body-level status as sent by the API (`"6"` for a legacy SMS failure).
    pub raw_status: Option<String>,
    /// Error type (`type` field of JSON problem responses).
    pub error_type: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            raw_status: None,
            error_type: None,
        }
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Outcome of an API call: either the decoded payload or the remote error.
///
/// Remote failures are values, not `Err`s: every call site has to match on both
/// variants.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ApiResult<T> {
    Success(T),
    Failure(ErrorInfo),
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success(value) => ApiResult::Success(f(value)),
            Self::Failure(error) => ApiResult::Failure(error),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> ApiResult<U>) -> ApiResult<U> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => ApiResult::Failure(error),
        }
    }

    /// Convert into a std `Result` for use with `?`.
    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

/// One fetched page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// The `_embedded` object as received (empty when the response has none).
    pub embedded: Map<String, Value>,
}

/// Accepted message from `sms/json` or the 2FA shortcode endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentMessage {
    #[serde(rename = "message-id")]
    pub message_id: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "remaining-balance", default)]
    pub remaining_balance: Option<String>,
    #[serde(rename = "message-price", default)]
    pub message_price: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}
