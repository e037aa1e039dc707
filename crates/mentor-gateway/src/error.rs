//! Error types for the gateway.
//!
//! Every expected failure mode of a remote call (unreachable endpoint,
//! timed-out request, non-success status, unreadable body, explicit
//! rejection) is normalized into one `GatewayError` variant so callers
//! branch on success vs. failure, never on transport detail.

/// A specialized `Result` type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Uniform failure contract for all remote calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The service could not be reached at all.
    #[error("network error: {message}\n\nSuggestion: Check that the mentor service is running and the apiUrl in mentor.json points at it")]
    Network {
        /// Transport-level description of the failure.
        message: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request timed out after {seconds}s\n\nSuggestion: Increase requestTimeout in mentor.json or try again")]
    Timeout {
        /// The timeout that was exceeded, in seconds.
        seconds: u64,
    },

    /// The service answered with a non-success status code.
    ///
    /// `message` is resolved from the response body (`detail`, then
    /// `message`, then `"HTTP {status}"`).
    #[error("{message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The resolved failure message.
        message: String,
    },

    /// The response body was missing required fields or unparsable.
    #[error("malformed response from the mentor service: {message}")]
    Payload {
        /// Description of what could not be read.
        message: String,
    },

    /// The service answered 2xx but flagged the request as unsuccessful.
    #[error("request rejected by the mentor service: {message}")]
    Rejected {
        /// The service's stated reason.
        message: String,
    },
}

impl GatewayError {
    /// Creates a new `Network` error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a new `Timeout` error.
    #[must_use]
    pub const fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Creates a new `Http` error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new `Payload` error.
    #[must_use]
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Creates a new `Rejected` error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Classifies a `reqwest` error into the gateway contract.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::timeout(timeout_secs)
        } else {
            Self::network(err.to_string())
        }
    }

    /// Returns `true` if this failure was a request timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns display-safe text for this failure.
    ///
    /// HTTP and rejection failures carry the service's own message verbatim;
    /// transport and payload failures map to generic wording so raw
    /// technical detail never reaches the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "Could not reach the code mentor service".to_string(),
            Self::Timeout { seconds } => {
                format!("The request timed out after {seconds}s")
            }
            Self::Http { message, .. } | Self::Rejected { message } => message.clone(),
            Self::Payload { .. } => {
                "The code mentor service returned an unreadable response".to_string()
            }
        }
    }
}
