//! Merchant configuration.
//!
//! # Environment Variables
//!
//! [`MerchantConfig::from_env`] reads:
//! - `ALIPAY_APP_ID` - application id issued by the open platform (required)
//! - `ALIPAY_PRIVATE_KEY_PATH` - merchant private key file (required)
//! - `ALIPAY_PUBLIC_KEY_PATH` - gateway public key file (required)
//! - `ALIPAY_ENV` - `production` or `sandbox`
//! - `ALIPAY_SIGN_TYPE` - `RSA` or `RSA2`
//! - `ALIPAY_GATEWAY_URL` - override the gateway URL
//! - `ALIPAY_TIMEOUT_SECS` - request timeout
//! - `ALIPAY_NOTIFY_URL` - default asynchronous notification URL

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::crypto::SignType;

/// Production gateway.
pub const PRODUCTION_GATEWAY_URL: &str = "https://openapi.alipay.com/gateway.do";

/// Sandbox gateway.
pub const SANDBOX_GATEWAY_URL: &str = "https://openapi.alipaydev.com/gateway.do";

/// Gateway environment selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnv {
    /// Live gateway.
    #[default]
    Production,
    /// Sandbox gateway.
    Sandbox,
}

impl GatewayEnv {
    /// Environment name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }

    /// Default gateway URL for this environment.
    pub fn gateway_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_GATEWAY_URL,
            Self::Sandbox => SANDBOX_GATEWAY_URL,
        }
    }

    /// Parse an environment name; anything but `sandbox` means production.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("sandbox") {
            Self::Sandbox
        } else {
            Self::Production
        }
    }
}

/// Configuration for one merchant application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// Application id issued by the open platform.
    pub app_id: String,

    /// Gateway environment.
    #[serde(default)]
    pub env: GatewayEnv,

    /// Signature algorithm for outbound and inbound signatures.
    #[serde(default)]
    pub sign_type: SignType,

    /// Merchant private key (PEM or bare base64 DER).
    pub private_key_path: PathBuf,

    /// Gateway public key (PEM or bare base64 DER).
    pub gateway_public_key_path: PathBuf,

    /// Gateway URL override. Defaults to the environment's URL.
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Default `notify_url` for order placement.
    #[serde(default)]
    pub notify_url: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl MerchantConfig {
    /// Create a production configuration.
    pub fn new(
        app_id: impl Into<String>,
        private_key_path: impl Into<PathBuf>,
        gateway_public_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            env: GatewayEnv::default(),
            sign_type: SignType::default(),
            private_key_path: private_key_path.into(),
            gateway_public_key_path: gateway_public_key_path.into(),
            gateway_url: None,
            timeout_secs: default_timeout(),
            notify_url: None,
        }
    }

    /// Load from `ALIPAY_*` environment variables.
    ///
    /// Returns `None` unless app id and both key paths are set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            non_empty("ALIPAY_APP_ID")?,
            non_empty("ALIPAY_PRIVATE_KEY_PATH")?,
            non_empty("ALIPAY_PUBLIC_KEY_PATH")?,
        );

        if let Some(env) = non_empty("ALIPAY_ENV") {
            config.env = GatewayEnv::from_name(&env);
        }
        if let Some(sign_type) = non_empty("ALIPAY_SIGN_TYPE").and_then(|s| s.parse().ok()) {
            config.sign_type = sign_type;
        }
        if let Some(secs) = non_empty("ALIPAY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout_secs = secs;
        }
        config.gateway_url = non_empty("ALIPAY_GATEWAY_URL");
        config.notify_url = non_empty("ALIPAY_NOTIFY_URL");

        Some(config)
    }

    /// Set the environment.
    pub fn with_env(mut self, env: GatewayEnv) -> Self {
        self.env = env;
        self
    }

    /// Set the signature algorithm.
    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Override the gateway URL.
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the default notify URL.
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    /// Gateway URL in effect.
    pub fn gateway_url(&self) -> &str {
        self.gateway_url
            .as_deref()
            .unwrap_or_else(|| self.env.gateway_url())
    }
}
