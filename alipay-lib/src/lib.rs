//! Alipay open platform client library.
//!
//! The crate implements the gateway's signed-parameter protocol and stays
//! transport-agnostic: requests go out through a [`GatewayTransport`]
//! supplied by the caller (a reqwest-backed one ships behind the default
//! `http-transport` feature).
//!
//! # Features
//!
//! - **Canonical encoding**: sorted `key=value&...` strings, see [`Params`]
//! - **Signing**: RSA PKCS#1 v1.5 with SHA-1 (`RSA`) or SHA-256 (`RSA2`)
//! - **Response verification**: over the exact bytes the gateway signed
//! - **Notifications**: decode and verify asynchronous trade notifications
//! - **Trade endpoints**: pay, precreate, create, query, cancel, close,
//!   refund and refund query
//!
//! # Example
//!
//! ```ignore
//! use alipay_lib::{AlipayClient, MerchantConfig};
//! use alipay_lib::trade::OrderRequest;
//!
//! let config = MerchantConfig::from_env().expect("ALIPAY_* not set");
//! let client = AlipayClient::from_config(&config)?;
//!
//! let order = client
//!     .precreate(&OrderRequest::new("M1452406488", 1234, "Car wash"))
//!     .await?;
//! println!("scan: {}", order.result.qr_code());
//! ```

pub mod biz;
pub mod client;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod errors;
pub mod notify;
pub mod observer;
pub mod params;
pub mod prelude;
pub mod response;
pub mod trade;
pub mod transport;

/// Test utilities for gateway client testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use biz::{BizContent, BizValue};
pub use client::AlipayClient;
pub use config::{GatewayEnv, MerchantConfig};
pub use crypto::{Credentials, SignType};
pub use errors::{AlipayError, AlipayErrorCode};
pub use notify::{TradeNotification, TradeStatus, SUCCESS_REPLY};
pub use params::Params;
pub use response::Verified;
pub use transport::GatewayTransport;

#[cfg(feature = "http-transport")]
pub use transport::HttpTransport;

/// Common result alias for gateway operations.
pub type Result<T> = std::result::Result<T, AlipayError>;
