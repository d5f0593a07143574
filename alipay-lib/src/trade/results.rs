//! Typed response content.
//!
//! Amounts arrive as decimal yuan strings and are kept verbatim; the
//! `*_cents` accessors convert with exact decimal arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::yuan_to_cents;
use crate::notify::TradeStatus;

/// `code` of a successful gateway call.
pub const SUCCESS_CODE: &str = "10000";

fn cents(yuan: &str) -> Option<i64> {
    if yuan.is_empty() {
        return None;
    }
    yuan_to_cents(yuan).ok()
}

/// Result of `query_order` and `micro_pay`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeQueryResult {
    pub code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_msg: Option<String>,
    pub trade_no: String,
    pub out_trade_no: String,
    pub trade_status: String,
    pub buyer_id: String,
    pub buyer_logon_id: String,
    pub total_amount: String,
    pub receipt_amount: String,
    pub send_pay_date: String,
    pub store_id: String,
    pub terminal_id: String,
    pub gmt_payment: String,
    pub fund_bill_list: Vec<Map<String, Value>>,
    pub voucher_detail_list: Vec<Map<String, Value>>,
}

impl TradeQueryResult {
    /// Paid, or the call itself succeeded.
    pub fn is_success(&self) -> bool {
        self.status() == TradeStatus::TradeSuccess || self.is_code_success()
    }

    /// The call succeeded.
    pub fn is_code_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Parsed `trade_status`.
    pub fn status(&self) -> TradeStatus {
        TradeStatus::parse(&self.trade_status)
    }

    /// `total_amount` in cents.
    pub fn total_amount_cents(&self) -> Option<i64> {
        cents(&self.total_amount)
    }

    /// `receipt_amount` in cents.
    pub fn receipt_amount_cents(&self) -> Option<i64> {
        cents(&self.receipt_amount)
    }
}

/// Result of `precreate`, `create`, `cancel_order` and `close_order`.
///
/// Fields without a dedicated member are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderResult {
    pub code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_msg: Option<String>,
    pub out_trade_no: String,
    pub trade_no: String,
    pub qr_code: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OrderResult {
    /// The call succeeded.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Same as [`is_success`](Self::is_success).
    pub fn is_code_success(&self) -> bool {
        self.is_success()
    }

    /// QR code content returned by `precreate`.
    pub fn qr_code(&self) -> &str {
        &self.qr_code
    }
}

/// Result of `refund` and `refund_query`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundResult {
    pub code: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_msg: Option<String>,
    pub trade_no: String,
    pub out_trade_no: String,
    // refund
    pub buyer_user_id: String,
    pub buyer_logon_id: String,
    pub gmt_refund_pay: String,
    pub refund_detail_item_list: Vec<Map<String, Value>>,
    pub store_name: String,
    pub refund_fee: String,
    pub fund_change: String,
    // refund query
    pub total_amount: String,
    pub refund_amount: String,
    pub refund_reason: String,
    pub out_request_no: String,
}

impl RefundResult {
    /// The call succeeded.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Same as [`is_success`](Self::is_success).
    pub fn is_code_success(&self) -> bool {
        self.is_success()
    }

    /// Whether money actually moved (`fund_change == "Y"`).
    pub fn fund_changed(&self) -> bool {
        self.fund_change == "Y"
    }

    /// `refund_fee` in cents.
    pub fn refund_fee_cents(&self) -> Option<i64> {
        cents(&self.refund_fee)
    }

    /// `refund_amount` in cents.
    pub fn refund_amount_cents(&self) -> Option<i64> {
        cents(&self.refund_amount)
    }

    /// `total_amount` in cents.
    pub fn total_amount_cents(&self) -> Option<i64> {
        cents(&self.total_amount)
    }
}
