//! reqwest-backed gateway transport.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::GatewayTransport;
use crate::{AlipayError, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

// Error bodies are echoed into error messages; keep them short.
const MAX_ERROR_BODY: usize = 512;

/// HTTP transport for the gateway.
///
/// Returns the body of any 2xx response untouched. Everything else maps to
/// an [`AlipayError`] transport variant.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AlipayError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(client: reqwest::Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout_secs,
        }
    }

    /// Map HTTP status codes to AlipayError.
    fn map_status_error(&self, status: u16, body: &[u8]) -> AlipayError {
        let text = String::from_utf8_lossy(body);
        let body = match text.char_indices().nth(MAX_ERROR_BODY) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.into_owned(),
        };
        AlipayError::HttpStatus { status, body }
    }

    /// Map reqwest errors to AlipayError.
    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> AlipayError {
        if e.is_timeout() {
            AlipayError::ConnectionTimeout {
                operation: "gateway request".to_string(),
                timeout_ms: self.timeout_secs.saturating_mul(1000),
            }
        } else if e.is_connect() {
            AlipayError::ConnectionFailed {
                target: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            AlipayError::Transport(format!("gateway request failed: {}", e))
        }
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(AlipayError::transport)?;

        if !status.is_success() {
            return Err(self.map_status_error(status.as_u16(), &bytes));
        }

        Ok(bytes.to_vec())
    }
}
