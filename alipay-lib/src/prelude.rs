//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use alipay_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Client: `AlipayClient`, `Credentials`, `SignType`, `MerchantConfig`
//! - Error types: `AlipayError`, `AlipayErrorCode`, `Result`
//! - Payloads: `Params`, `BizContent`
//! - Trade requests and results
//! - Notifications: `TradeNotification`, `TradeStatus`, `SUCCESS_REPLY`

// Client
pub use crate::client::AlipayClient;
pub use crate::config::{GatewayEnv, MerchantConfig};
pub use crate::crypto::{Credentials, SignType};

// Error handling
pub use crate::errors::{AlipayError, AlipayErrorCode};
pub use crate::Result;

// Payloads
pub use crate::biz::{BizContent, BizValue};
pub use crate::params::Params;
pub use crate::response::Verified;

// Trade endpoints
pub use crate::trade::{
    OrderRequest, OrderResult, PayRequest, RefundQueryRequest, RefundRequest, RefundResult,
    TradeMethod, TradeQueryResult,
};

// Notifications
pub use crate::notify::{TradeNotification, TradeStatus, SUCCESS_REPLY};

// Observer and transport
pub use crate::observer::{ClientEvent, ClientObserver, NoopObserver, TracingObserver};
pub use crate::transport::GatewayTransport;

#[cfg(feature = "http-transport")]
pub use crate::transport::HttpTransport;
