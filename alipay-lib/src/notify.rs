//! Asynchronous trade notifications.
//!
//! The gateway posts a form-encoded body whenever a trade changes state.
//! Unlike API responses, notifications carry no inherent field order, so
//! they are verified against the canonical encoding of their fields.

use std::fmt;

use rsa::RsaPublicKey;
use rust_decimal::Decimal;

use crate::crypto::{self, SignType};
use crate::params::Params;
use crate::trade::yuan_to_cents;
use crate::{AlipayError, Result};

/// Body the merchant returns to acknowledge a notification. Anything else
/// makes the gateway retry delivery.
pub const SUCCESS_REPLY: &str = "success";

/// Decode and verify a notification body.
///
/// Returns the business fields, without `sign` and `sign_type`. A body with
/// no signature at all is rejected like one with a bad signature.
pub fn parse_notification(
    gateway_key: &RsaPublicKey,
    sign_type: SignType,
    raw: &[u8],
) -> Result<Params> {
    let (sign, fields) = Params::from_form(raw)?.split_signature();
    let sign = sign
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AlipayError::InvalidSignature("notification carries no sign".to_string()))?;

    crypto::verify(gateway_key, sign_type, fields.encode(false).as_bytes(), &sign)?;
    Ok(fields)
}

/// Trade state reported by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TradeStatus {
    /// Trade created, waiting for the buyer to pay
    WaitBuyerPay,
    /// Unpaid trade closed, or fully refunded
    TradeClosed,
    /// Paid; refunds still possible
    TradeSuccess,
    /// Finished; no further refunds
    TradeFinished,
    /// A value this crate does not know
    Unknown(String),
}

impl TradeStatus {
    /// Parse a gateway status string.
    pub fn parse(s: &str) -> Self {
        match s {
            "WAIT_BUYER_PAY" => Self::WaitBuyerPay,
            "TRADE_CLOSED" => Self::TradeClosed,
            "TRADE_SUCCESS" => Self::TradeSuccess,
            "TRADE_FINISHED" => Self::TradeFinished,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Gateway status string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::WaitBuyerPay => "WAIT_BUYER_PAY",
            Self::TradeClosed => "TRADE_CLOSED",
            Self::TradeSuccess => "TRADE_SUCCESS",
            Self::TradeFinished => "TRADE_FINISHED",
            Self::Unknown(s) => s,
        }
    }

    /// Paid, whether or not refunds remain possible.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::TradeSuccess | Self::TradeFinished)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified notification with typed accessors.
///
/// Every field the gateway sent stays available through [`params`](Self::params).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeNotification {
    params: Params,
}

impl TradeNotification {
    /// Wrap verified notification fields.
    pub fn from_params(params: Params) -> Self {
        Self { params }
    }

    /// All fields.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Consume into the raw fields.
    pub fn into_params(self) -> Params {
        self.params
    }

    /// A field by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// `trade_status`.
    pub fn trade_status(&self) -> TradeStatus {
        TradeStatus::parse(self.get("trade_status").unwrap_or_default())
    }

    /// Merchant order number.
    pub fn out_trade_no(&self) -> Option<&str> {
        self.get("out_trade_no")
    }

    /// Gateway trade number.
    pub fn trade_no(&self) -> Option<&str> {
        self.get("trade_no")
    }

    /// App the trade belongs to.
    pub fn app_id(&self) -> Option<&str> {
        self.get("app_id")
    }

    /// Notification id, stable across redeliveries.
    pub fn notify_id(&self) -> Option<&str> {
        self.get("notify_id")
    }

    /// When the gateway sent this notification.
    pub fn notify_time(&self) -> Option<&str> {
        self.get("notify_time")
    }

    /// Buyer's gateway user id.
    pub fn buyer_id(&self) -> Option<&str> {
        self.get("buyer_id")
    }

    /// Payment time, when paid.
    pub fn gmt_payment(&self) -> Option<&str> {
        self.get("gmt_payment")
    }

    /// `total_amount` in yuan, as sent.
    pub fn total_amount(&self) -> Option<Decimal> {
        self.get("total_amount").and_then(|s| s.parse().ok())
    }

    /// `total_amount` in cents. Zero when absent or malformed.
    pub fn total_fee(&self) -> i64 {
        self.get("total_amount")
            .and_then(|s| yuan_to_cents(s).ok())
            .unwrap_or(0)
    }

    /// Status is exactly `TRADE_SUCCESS`.
    pub fn is_success(&self) -> bool {
        self.trade_status() == TradeStatus::TradeSuccess
    }

    /// Status is `TRADE_SUCCESS` or `TRADE_FINISHED`.
    pub fn is_trade_success(&self) -> bool {
        self.trade_status().is_paid()
    }
}
