//! Error types for uw-core

use thiserror::Error;

/// Result type alias for uw-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool invocations
///
/// Every failure a caller can observe falls into one of three kinds. None of
/// them are recovered locally: a call either returns a complete table or
/// fails with exactly one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// A tool parameter violates its declared constraint
    ///
    /// Raised before any network call is made.
    #[error("Invalid parameter `{param}`: {reason}")]
    Validation {
        /// Name of the offending parameter
        param: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The remote API answered with a non-2xx status, or could not be reached
    #[error("{}", request_message(.status, .body))]
    Request {
        /// HTTP status code; `None` for network failures and timeouts
        status: Option<u16>,
        /// Response body text, or the transport error message
        body: String,
    },

    /// The response body is not JSON or has no record array
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Discriminant of [`Error`], used for structured error payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Request,
    Parse,
}

impl ErrorKind {
    /// Stable identifier used in error payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::Request => "request_error",
            Self::Parse => "parse_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Build a validation error for `param`
    pub fn validation(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Build a request error from a non-2xx response
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Build a request error for a transport failure (no response received)
    pub fn network(message: impl Into<String>) -> Self {
        Self::Request {
            status: None,
            body: message.into(),
        }
    }

    /// Build a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Request { .. } => ErrorKind::Request,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }

    /// HTTP status carried by a request error
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Parameter named by a validation error
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Validation { param, .. } => Some(param),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn request_message(status: &Option<u16>, body: &str) -> String {
    match status {
        None => format!("Network error: {body}"),
        Some(401) => "Invalid or missing API key".to_string(),
        Some(404) => format!("Resource not found: {body}"),
        Some(429) => "Rate limit exceeded".to_string(),
        Some(code) => format!("HTTP error {code}: {body}"),
    }
}
