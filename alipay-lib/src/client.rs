//! Gateway client.
//!
//! [`AlipayClient`] owns the merchant credentials, a transport and an
//! observer. It is immutable after construction and can be shared across
//! tasks; every call is independent.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::biz::BizContent;
use crate::config::GatewayEnv;
use crate::crypto::{Credentials, SignType};
use crate::envelope::Envelope;
use crate::notify::{self, TradeNotification};
use crate::observer::{ClientEvent, ClientObserver, TracingObserver};
use crate::params::Params;
use crate::response::{self, Verified};
use crate::transport::GatewayTransport;
use crate::Result;

#[cfg(feature = "http-transport")]
use crate::{config::MerchantConfig, transport::HttpTransport};

/// Client for one merchant application.
pub struct AlipayClient<T> {
    app_id: String,
    gateway_url: String,
    env: GatewayEnv,
    sign_type: SignType,
    notify_url: Option<String>,
    credentials: Credentials,
    transport: T,
    observer: Arc<dyn ClientObserver>,
}

#[cfg(feature = "http-transport")]
impl AlipayClient<HttpTransport> {
    /// Load keys and build an HTTP client from `config`.
    pub fn from_config(config: &MerchantConfig) -> Result<Self> {
        let credentials =
            Credentials::load(&config.private_key_path, &config.gateway_public_key_path)?;
        let transport = HttpTransport::new(config.timeout_secs)?;

        let mut client = Self::new(
            config.app_id.clone(),
            config.gateway_url(),
            credentials,
            transport,
        )
        .with_env(config.env)
        .with_sign_type(config.sign_type);
        client.notify_url = config.notify_url.clone().filter(|url| !url.is_empty());
        Ok(client)
    }
}

impl<T: GatewayTransport> AlipayClient<T> {
    /// Create a client. Defaults: production, `RSA`, tracing observer.
    pub fn new(
        app_id: impl Into<String>,
        gateway_url: impl Into<String>,
        credentials: Credentials,
        transport: T,
    ) -> Self {
        let app_id = app_id.into();
        Self {
            observer: Arc::new(TracingObserver::new(app_id.clone())),
            app_id,
            gateway_url: gateway_url.into(),
            env: GatewayEnv::default(),
            sign_type: SignType::default(),
            notify_url: None,
            credentials,
            transport,
        }
    }

    /// Signature algorithm for requests, responses and notifications.
    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Gateway environment. Decides whether `sub_merchant` is sent.
    pub fn with_env(mut self, env: GatewayEnv) -> Self {
        self.env = env;
        self
    }

    /// Default `notify_url` for order placement.
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Merchant app id sent with every request.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Gateway endpoint requests are posted to.
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Target environment.
    pub fn env(&self) -> GatewayEnv {
        self.env
    }

    /// Algorithm for requests, responses and notifications.
    pub fn sign_type(&self) -> SignType {
        self.sign_type
    }

    /// Client-level default notify URL.
    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether an app id is configured. Keys are always present.
    pub fn is_valid(&self) -> bool {
        !self.app_id.is_empty()
    }

    /// Sign `data` with the merchant key.
    pub fn sign(&self, data: &[u8]) -> Result<String> {
        self.credentials.sign(self.sign_type, data)
    }

    /// Verify `signature` over `data` with the gateway key.
    pub fn verify(&self, data: &[u8], signature: &str) -> Result<()> {
        self.credentials.verify(self.sign_type, data, signature)
    }

    /// Build, sign and post one request; return the raw response body.
    ///
    /// An empty `notify_url` is left out of the envelope. The response is
    /// not verified here.
    #[tracing::instrument(skip(self, biz), fields(app_id = %self.app_id))]
    pub async fn biz_request(
        &self,
        method: &str,
        notify_url: &str,
        biz: &BizContent,
    ) -> Result<Vec<u8>> {
        let signed = Envelope::new(self.app_id.as_str(), method, biz.to_json()?)
            .notify_url(notify_url)
            .sign_type(self.sign_type)
            .sign(&self.credentials)?;
        let body = signed.to_form_body();

        self.emit(ClientEvent::RequestSent {
            method: method.to_string(),
            body_len: body.len(),
        });
        let raw = self.transport.post_form(&self.gateway_url, body).await?;
        self.emit(ClientEvent::ResponseReceived {
            method: method.to_string(),
            body_len: raw.len(),
        });

        Ok(raw)
    }

    /// Verify a response body's signed span against `signature`.
    pub fn verify_response(&self, raw: &[u8], signature: &str, response_key: &str) -> Result<()> {
        let outcome = response::verify_response(
            self.credentials.gateway_key(),
            self.sign_type,
            raw,
            signature,
            response_key,
        );

        match &outcome {
            Ok(()) => self.emit(ClientEvent::ResponseVerified {
                response_key: response_key.to_string(),
            }),
            Err(e) => self.emit(ClientEvent::VerificationFailed {
                context: response_key.to_string(),
                reason: e.to_string(),
            }),
        }
        outcome
    }

    /// Request, decode and verify in one step. Nothing is returned unless
    /// the signature holds.
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        notify_url: &str,
        biz: &BizContent,
    ) -> Result<Verified<R>> {
        let raw = self.biz_request(method, notify_url, biz).await?;
        let response_key = crate::trade::response_key(method);

        let (result, sign) = response::decode_response::<R>(&raw, &response_key)?;
        self.verify_response(&raw, &sign, &response_key)?;

        Ok(Verified { result, raw })
    }

    /// Decode and verify a notification body; return its business fields.
    pub fn parse_notification(&self, raw: &[u8]) -> Result<Params> {
        match notify::parse_notification(self.credentials.gateway_key(), self.sign_type, raw) {
            Ok(fields) => {
                self.emit(ClientEvent::NotificationVerified {
                    out_trade_no: fields.get("out_trade_no").map(str::to_string),
                });
                Ok(fields)
            }
            Err(e) => {
                self.emit(ClientEvent::VerificationFailed {
                    context: "notification".to_string(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// [`parse_notification`](Self::parse_notification) with typed access.
    pub fn notify(&self, raw: &[u8]) -> Result<TradeNotification> {
        self.parse_notification(raw).map(TradeNotification::from_params)
    }

    /// Request notify URL, or the client default.
    pub(crate) fn resolve_notify_url<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|url| !url.is_empty())
            .or(self.notify_url.as_deref())
            .unwrap_or_default()
    }

    fn emit(&self, event: ClientEvent) {
        self.observer.on_event(&event);
    }
}
