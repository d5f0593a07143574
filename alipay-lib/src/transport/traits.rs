use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

/// POST-and-read-body seam used by the client.
///
/// Implementations own timeouts and cancellation. The client calls
/// [`post_form`](Self::post_form) exactly once per request and never
/// retries.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Send `body` as `application/x-www-form-urlencoded` to `url` and return
    /// the response body unmodified.
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: GatewayTransport + ?Sized> GatewayTransport for Arc<T> {
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>> {
        (**self).post_form(url, body).await
    }
}

#[async_trait]
impl<T: GatewayTransport + ?Sized> GatewayTransport for Box<T> {
    async fn post_form(&self, url: &str, body: String) -> Result<Vec<u8>> {
        (**self).post_form(url, body).await
    }
}
