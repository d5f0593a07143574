//! Outbound request envelope.
//!
//! An envelope is the fixed protocol metadata plus the business payload.
//! Signing encodes the envelope without URL-encoding, signs that string,
//! and attaches the result under `sign`. The form body is the full set,
//! signature included, URL-encoded.

use chrono::{Duration, Utc};

use crate::crypto::{Credentials, SignType};
use crate::params::{Params, SIGN, SIGN_TYPE};
use crate::Result;

/// Protocol version sent with every request.
pub const VERSION: &str = "1.0";

/// Character set sent with every request.
pub const CHARSET: &str = "utf-8";

/// `timestamp` field format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The gateway reads timestamps as wall-clock time in UTC+08:00.
const GATEWAY_UTC_OFFSET_HOURS: i64 = 8;

/// Current time rendered for the `timestamp` field.
pub fn gateway_timestamp() -> String {
    (Utc::now().naive_utc() + Duration::hours(GATEWAY_UTC_OFFSET_HOURS))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// An unsigned request envelope. Built per call, never persisted.
#[derive(Clone, Debug)]
pub struct Envelope {
    app_id: String,
    method: String,
    biz_content: String,
    notify_url: Option<String>,
    timestamp: String,
    sign_type: SignType,
}

impl Envelope {
    /// Envelope for `method` carrying an already-serialized `biz_content`,
    /// stamped with the current gateway time.
    pub fn new(
        app_id: impl Into<String>,
        method: impl Into<String>,
        biz_content: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            method: method.into(),
            biz_content: biz_content.into(),
            notify_url: None,
            timestamp: gateway_timestamp(),
            sign_type: SignType::default(),
        }
    }

    /// Attach a `notify_url`. Empty strings are ignored.
    pub fn notify_url(mut self, url: &str) -> Self {
        self.notify_url = (!url.is_empty()).then(|| url.to_string());
        self
    }

    /// Override the timestamp.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Choose the signature algorithm.
    pub fn sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Gateway method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The envelope fields, without a signature.
    pub fn params(&self) -> Params {
        let mut params = Params::new()
            .with("app_id", self.app_id.as_str())
            .with("method", self.method.as_str())
            .with("charset", CHARSET)
            .with("timestamp", self.timestamp.as_str())
            .with("version", VERSION)
            .with("biz_content", self.biz_content.as_str())
            .with(SIGN_TYPE, self.sign_type.as_str());
        if let Some(url) = &self.notify_url {
            params.insert("notify_url", url.as_str());
        }
        params
    }

    /// The exact string that gets signed.
    pub fn sign_content(&self) -> String {
        self.params().encode(false)
    }

    /// Sign with the merchant key.
    pub fn sign(&self, credentials: &Credentials) -> Result<SignedEnvelope> {
        let mut params = self.params();
        let signature = credentials.sign(self.sign_type, params.encode(false).as_bytes())?;
        params.insert(SIGN, signature);
        Ok(SignedEnvelope { params })
    }
}

/// An envelope with its trailing signature attached.
#[derive(Clone, Debug)]
pub struct SignedEnvelope {
    params: Params,
}

impl SignedEnvelope {
    /// All fields, signature included.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The base64 signature.
    pub fn signature(&self) -> &str {
        self.params.get(SIGN).unwrap_or_default()
    }

    /// URL-encoded request body.
    pub fn to_form_body(&self) -> String {
        self.params.encode(true)
    }
}
