//! Test utilities for gateway client testing.
//!
//! This module provides:
//! - Fixed merchant and gateway key pairs
//! - Gateway-signed response and notification bodies
//! - An in-memory [`MockTransport`] that records requests
//! - Assertion helpers for error codes and signed requests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alipay_lib::test_utils::{signed_response, MockTransport, TestKeys};
//!
//! let transport = MockTransport::new();
//! transport.respond_with(signed_response(
//!     "alipay_trade_query_response",
//!     r#"{"code":"10000","msg":"Success"}"#,
//!     SignType::Rsa,
//! ));
//! let client = AlipayClient::new("app", "https://gw", TestKeys::credentials(), transport);
//! ```

mod assertions;
mod fixtures;
mod mock_transport;

pub use assertions::{assert_error_code, assert_signed_request};
pub use fixtures::{
    signed_notification, signed_response, KeyPair, TestKeys, KNOWN_ANSWER_MESSAGE,
    KNOWN_ANSWER_RSA, KNOWN_ANSWER_RSA2, TEST_APP_ID,
};
pub use mock_transport::{MockTransport, RecordedRequest};
