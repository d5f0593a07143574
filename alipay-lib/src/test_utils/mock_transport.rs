//! In-memory gateway transport.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::params::Params;
use crate::transport::GatewayTransport;
use crate::{AlipayError, Result};

/// A request seen by [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// Gateway URL posted to
    pub url: String,
    /// URL-encoded form body
    pub body: String,
}

impl RecordedRequest {
    /// Decoded form fields.
    pub fn params(&self) -> Params {
        Params::from_form(self.body.as_bytes()).unwrap_or_default()
    }
}

/// Transport that replays canned replies in order and records every request.
///
/// With no reply queued, calls fail with a transport error.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Vec<u8>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply body.
    pub fn respond_with(&self, body: impl Into<Vec<u8>>) -> &Self {
        self.lock_replies().push_back(Ok(body.into()));
        self
    }

    /// Queue a failure.
    pub fn fail_with(&self, error: AlipayError) -> &Self {
        self.lock_replies().push_back(Err(error));
        self
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<u8>>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GatewayTransport for MockTransport {
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                body,
            });

        self.lock_replies()
            .pop_front()
            .unwrap_or_else(|| Err(AlipayError::Transport("no reply queued".to_string())))
    }
}
