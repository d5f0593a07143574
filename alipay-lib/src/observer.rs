//! Injectable client observer.
//!
//! Each client carries its own observer, so several clients in one process
//! (or one test binary) never share log state. The default,
//! [`TracingObserver`], forwards events to `tracing` tagged with the
//! client's app id.

use std::fmt;

/// Something worth reporting about a client call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// A signed envelope is about to be posted.
    RequestSent {
        /// Gateway method name
        method: String,
        /// Length of the form body in bytes
        body_len: usize,
    },
    /// Raw response bytes came back from the transport.
    ResponseReceived {
        /// Gateway method name
        method: String,
        /// Length of the response body in bytes
        body_len: usize,
    },
    /// A response's signed span verified.
    ResponseVerified {
        /// Response key the span was located under
        response_key: String,
    },
    /// A notification verified.
    NotificationVerified {
        /// `out_trade_no` carried by the notification, if any
        out_trade_no: Option<String>,
    },
    /// Verification of a response or notification failed.
    VerificationFailed {
        /// What was being verified
        context: String,
        /// Error text
        reason: String,
    },
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestSent { method, body_len } => {
                write!(f, "request {} sent ({} bytes)", method, body_len)
            }
            Self::ResponseReceived { method, body_len } => {
                write!(f, "response to {} received ({} bytes)", method, body_len)
            }
            Self::ResponseVerified { response_key } => {
                write!(f, "response {} verified", response_key)
            }
            Self::NotificationVerified { out_trade_no } => match out_trade_no {
                Some(id) => write!(f, "notification for {} verified", id),
                None => write!(f, "notification verified"),
            },
            Self::VerificationFailed { context, reason } => {
                write!(f, "{} failed verification: {}", context, reason)
            }
        }
    }
}

/// Receives client events.
pub trait ClientObserver: Send + Sync {
    /// Handle one event. Must not block.
    fn on_event(&self, event: &ClientEvent);
}

/// Forwards events to `tracing`.
#[derive(Clone, Debug)]
pub struct TracingObserver {
    app_id: String,
}

impl TracingObserver {
    /// Create an observer that tags every event with `app_id`.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

impl ClientObserver for TracingObserver {
    fn on_event(&self, event: &ClientEvent) {
        match event {
            ClientEvent::VerificationFailed { context, reason } => {
                tracing::warn!(app_id = %self.app_id, %context, %reason, "verification failed");
            }
            other => {
                tracing::debug!(app_id = %self.app_id, "{}", other);
            }
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ClientObserver for NoopObserver {
    fn on_event(&self, _event: &ClientEvent) {}
}
