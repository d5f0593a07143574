//! Error types for gateway operations.
//!
//! Every failure surfaces to the immediate caller. A signature failure is
//! never downgraded: a response or notification that fails verification
//! must be discarded.

/// Stable numeric codes, handy for FFI and log aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AlipayErrorCode {
    /// Bad key material or configuration
    Config = 1000,
    /// Business payload could not be serialized
    Serialization = 2000,
    /// Invalid caller-supplied data
    InvalidData = 2001,
    /// Signing failed
    Signing = 3000,
    /// Transport/network layer error
    Transport = 4000,
    /// Connection failed
    ConnectionFailed = 4001,
    /// Connection timeout
    ConnectionTimeout = 4002,
    /// Gateway answered with a non-success HTTP status
    HttpStatus = 4003,
    /// Response body does not have the expected envelope shape
    Format = 5000,
    /// Signature text is not valid base64
    SignatureEncoding = 6000,
    /// Signature does not verify
    InvalidSignature = 6001,
}

/// Error type for every operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum AlipayError {
    /// Key material or configuration is unusable. Fatal to client construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// The business payload cannot be turned into the wire format.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A caller-supplied field is invalid.
    #[error("invalid {field}: {reason}")]
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Producing a signature failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Transport/network layer error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection failed.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed {
        /// Target gateway URL
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    #[error("{operation} timed out after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body does not match the expected envelope shape.
    #[error("response format unrecognized: {0}")]
    Format(String),

    /// Signature text could not be decoded.
    #[error("malformed signature encoding: {0}")]
    SignatureEncoding(String),

    /// Signature does not verify against the message.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

impl AlipayError {
    /// Stable numeric code for this error.
    pub fn code(&self) -> AlipayErrorCode {
        match self {
            Self::Config(_) => AlipayErrorCode::Config,
            Self::Serialization(_) => AlipayErrorCode::Serialization,
            Self::InvalidData { .. } => AlipayErrorCode::InvalidData,
            Self::Signing(_) => AlipayErrorCode::Signing,
            Self::Transport(_) => AlipayErrorCode::Transport,
            Self::ConnectionFailed { .. } => AlipayErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => AlipayErrorCode::ConnectionTimeout,
            Self::HttpStatus { .. } => AlipayErrorCode::HttpStatus,
            Self::Format(_) => AlipayErrorCode::Format,
            Self::SignatureEncoding(_) => AlipayErrorCode::SignatureEncoding,
            Self::InvalidSignature(_) => AlipayErrorCode::InvalidSignature,
        }
    }

    /// Returns true if the caller may retry the call externally.
    ///
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. } => {
                true
            }
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true when the payload must be treated as unauthenticated.
    pub fn is_signature_failure(&self) -> bool {
        matches!(self, Self::InvalidSignature(_) | Self::SignatureEncoding(_))
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AlipayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AlipayError::ConnectionTimeout {
            operation: "gateway request".to_string(),
            timeout_ms: 30_000,
        };
        assert_eq!(err.code(), AlipayErrorCode::ConnectionTimeout);
        assert!(err.is_retryable());
        assert!(!err.is_signature_failure());
    }

    #[test]
    fn test_signature_failures_are_not_retryable() {
        let err = AlipayError::InvalidSignature("tampered".to_string());
        assert!(err.is_signature_failure());
        assert!(!err.is_retryable());

        let err = AlipayError::SignatureEncoding("bad base64".to_string());
        assert!(err.is_signature_failure());
        assert_eq!(err.code(), AlipayErrorCode::SignatureEncoding);
    }

    #[test]
    fn test_http_status_retry_split() {
        let server = AlipayError::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        let client = AlipayError::HttpStatus {
            status: 400,
            body: "bad request".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = AlipayError::invalid_data("total_amount", "must not be negative");
        assert_eq!(err.to_string(), "invalid total_amount: must not be negative");
        assert_eq!(err.code(), AlipayErrorCode::InvalidData);

        let err = AlipayError::Format("missing sign".to_string());
        assert!(err.to_string().starts_with("response format unrecognized"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: AlipayError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), AlipayErrorCode::Serialization);
    }
}
