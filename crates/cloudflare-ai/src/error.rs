use serde::Deserialize;
use thiserror::Error;

/// Categorizes errors for retry logic and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rate limiting - should retry with backoff
    RateLimit,
    /// Authentication/authorization issues - should not retry
    Auth,
    /// Invalid request format - should not retry
    InvalidRequest,
    /// Network/connection issues - may retry
    Network,
    /// API temporarily unavailable - may retry
    ServiceUnavailable,
    /// Unknown/other errors
    Other,
}

/// A single error entry from the Cloudflare API envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}

/// The `errors` portion of a Cloudflare `{success, errors, messages}` envelope
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Error)]
pub enum CloudflareRequestError {
    /// Errors from the HTTP client
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// Request rejected locally before any network I/O
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// API key or account identifier missing/empty
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Remote rejection carrying the HTTP status and the API error detail
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    /// Unexpected response from the API
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),

    /// Invalid event data in stream
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),
}

impl CloudflareRequestError {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns the error kind for categorizing errors in retry logic
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimit => ErrorKind::RateLimit,
            Self::Authentication(_) | Self::PermissionDenied(_) | Self::MissingCredentials(_) => {
                ErrorKind::Auth
            }
            Self::InvalidRequest { .. } | Self::NotFound(_) => ErrorKind::InvalidRequest,
            Self::ReqwestError(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    ErrorKind::Network
                } else {
                    ErrorKind::Other
                }
            }
            Self::Api { status, .. } if *status >= 500 => ErrorKind::ServiceUnavailable,
            Self::Api { .. } => ErrorKind::InvalidRequest,
            Self::SerdeError(_) | Self::UnexpectedResponse(_) | Self::InvalidEventData(_) => {
                ErrorKind::Other
            }
        }
    }

    /// Returns true if this error should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimit | ErrorKind::Network | ErrorKind::ServiceUnavailable
        )
    }
}

/// Parse an error response from the Cloudflare API.
/// Handles both the structured `{success, errors}` envelope and plain text bodies.
pub fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: bytes::Bytes,
) -> CloudflareRequestError {
    if let Ok(payload) = serde_json::from_slice::<ApiErrorResponse>(&bytes) {
        if let Some(first) = payload.errors.into_iter().next() {
            return match status.as_u16() {
                401 => CloudflareRequestError::Authentication(first.message),
                403 => CloudflareRequestError::PermissionDenied(first.message),
                404 => CloudflareRequestError::NotFound(first.message),
                429 => CloudflareRequestError::RateLimit,
                _ => CloudflareRequestError::Api {
                    status: status.as_u16(),
                    code: first.code,
                    message: first.message,
                },
            };
        }
    }

    // Fall back to the raw body
    let error_text = String::from_utf8_lossy(&bytes).to_string();
    match status.as_u16() {
        401 => CloudflareRequestError::Authentication(error_text),
        403 => CloudflareRequestError::PermissionDenied(error_text),
        404 => CloudflareRequestError::NotFound(error_text),
        429 => CloudflareRequestError::RateLimit,
        _ => CloudflareRequestError::Api {
            status: status.as_u16(),
            code: None,
            message: error_text,
        },
    }
}
