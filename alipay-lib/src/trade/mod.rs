//! Trade endpoints.
//!
//! Each endpoint maps a typed request onto a [`BizContent`](crate::BizContent),
//! sends it through [`AlipayClient::call`](crate::AlipayClient::call) and
//! hands back a [`Verified`](crate::response::Verified) result.
//!
//! Amounts are taken in cents and sent as two-decimal yuan strings.

mod endpoints;
mod requests;
mod results;

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub use requests::{OrderRequest, PayRequest, RefundQueryRequest, RefundRequest};
pub use results::{OrderResult, RefundResult, TradeQueryResult, SUCCESS_CODE};

use crate::{AlipayError, Result};

/// Gateway methods covered by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeMethod {
    /// Barcode / face-to-face payment
    Pay,
    /// QR code pre-order
    Precreate,
    /// Order created for an identified buyer
    Create,
    Query,
    Cancel,
    Close,
    Refund,
    RefundQuery,
}

impl TradeMethod {
    /// All methods.
    pub const ALL: [TradeMethod; 8] = [
        Self::Pay,
        Self::Precreate,
        Self::Create,
        Self::Query,
        Self::Cancel,
        Self::Close,
        Self::Refund,
        Self::RefundQuery,
    ];

    /// Gateway method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pay => "alipay.trade.pay",
            Self::Precreate => "alipay.trade.precreate",
            Self::Create => "alipay.trade.create",
            Self::Query => "alipay.trade.query",
            Self::Cancel => "alipay.trade.cancel",
            Self::Close => "alipay.trade.close",
            Self::Refund => "alipay.trade.refund",
            Self::RefundQuery => "alipay.trade.fastpay.refund.query",
        }
    }

    /// Top-level key the response content is found under.
    pub fn response_key(&self) -> String {
        response_key(self.as_str())
    }
}

impl fmt::Display for TradeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response key for any gateway method name.
///
/// ```
/// assert_eq!(
///     alipay_lib::trade::response_key("alipay.trade.query"),
///     "alipay_trade_query_response"
/// );
/// ```
pub fn response_key(method: &str) -> String {
    format!("{}_response", method.replace('.', "_"))
}

/// Render cents as a yuan string with two decimals (`1234` becomes `"12.34"`).
pub fn cents_to_yuan(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}

/// Parse a yuan string into cents. Digits past the second decimal are
/// dropped.
pub fn yuan_to_cents(yuan: &str) -> Result<i64> {
    let invalid = |reason: String| AlipayError::invalid_data("amount", reason);

    let value: Decimal = yuan
        .trim()
        .parse()
        .map_err(|e| invalid(format!("{:?} is not a decimal: {}", yuan, e)))?;

    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.trunc().to_i64())
        .ok_or_else(|| invalid(format!("{} out of range", yuan)))
}

/// Validate a caller-supplied amount in cents and render it for the wire.
pub(crate) fn wire_amount(field: &str, cents: i64) -> Result<String> {
    if cents < 0 {
        return Err(AlipayError::invalid_data(
            field,
            format!("amount must not be negative, got {} cents", cents),
        ));
    }
    Ok(cents_to_yuan(cents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlipayErrorCode;

    #[test]
    fn test_response_keys() {
        assert_eq!(TradeMethod::Pay.response_key(), "alipay_trade_pay_response");
        assert_eq!(
            TradeMethod::RefundQuery.response_key(),
            "alipay_trade_fastpay_refund_query_response"
        );
        for method in TradeMethod::ALL {
            assert!(method.response_key().ends_with("_response"));
            assert!(!method.response_key().contains('.'));
        }
    }

    #[test]
    fn test_cents_to_yuan() {
        assert_eq!(cents_to_yuan(1234), "12.34");
        assert_eq!(cents_to_yuan(100), "1.00");
        assert_eq!(cents_to_yuan(5), "0.05");
        assert_eq!(cents_to_yuan(0), "0.00");
    }

    #[test]
    fn test_yuan_to_cents() {
        assert_eq!(yuan_to_cents("88.88").unwrap(), 8888);
        assert_eq!(yuan_to_cents("1").unwrap(), 100);
        assert_eq!(yuan_to_cents(" 0.01 ").unwrap(), 1);
        assert_eq!(yuan_to_cents("1.009").unwrap(), 100);
        // 0.29 * 100 is 28.999... in binary floating point
        assert_eq!(yuan_to_cents("0.29").unwrap(), 29);
        assert_eq!(
            yuan_to_cents("abc").unwrap_err().code(),
            AlipayErrorCode::InvalidData
        );
    }

    #[test]
    fn test_wire_amount_rejects_negative() {
        assert_eq!(wire_amount("total_amount", 1).unwrap(), "0.01");
        let err = wire_amount("total_amount", -1).unwrap_err();
        assert_eq!(err.code(), AlipayErrorCode::InvalidData);
        assert!(err.to_string().contains("total_amount"));
    }
}
