//! Typed endpoint requests.

use super::wire_amount;
use crate::biz::BizContent;
use crate::config::GatewayEnv;
use crate::{AlipayError, Result};

/// Default `scene` for barcode payments.
pub const BAR_CODE_SCENE: &str = "bar_code";

fn sub_merchant(biz: BizContent, env: GatewayEnv, merchant_id: &str) -> BizContent {
    if env == GatewayEnv::Sandbox || merchant_id.is_empty() {
        return biz;
    }
    biz.field(
        "sub_merchant",
        BizContent::new().field("merchant_id", merchant_id),
    )
}

/// Order placement for `precreate` and `create`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub out_trade_no: String,
    /// Amount in cents.
    pub total_amount: i64,
    pub subject: String,
    pub body: String,
    pub store_id: String,
    pub timeout_express: String,
    /// Buyer's user id, used by `create`.
    pub buyer_id: String,
    /// Buyer's logon id, used by `create`.
    pub buyer_logon_id: String,
    /// Sent as `sub_merchant.merchant_id` outside the sandbox.
    pub sub_merchant_id: String,
    /// Overrides the client's default notify URL.
    pub notify_url: Option<String>,
}

impl OrderRequest {
    pub fn new(out_trade_no: impl Into<String>, total_amount: i64, subject: impl Into<String>) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            total_amount,
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    pub fn with_timeout_express(mut self, timeout: impl Into<String>) -> Self {
        self.timeout_express = timeout.into();
        self
    }

    pub fn with_buyer_id(mut self, buyer_id: impl Into<String>) -> Self {
        self.buyer_id = buyer_id.into();
        self
    }

    pub fn with_buyer_logon_id(mut self, logon_id: impl Into<String>) -> Self {
        self.buyer_logon_id = logon_id.into();
        self
    }

    pub fn with_sub_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.sub_merchant_id = merchant_id.into();
        self
    }

    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    pub(crate) fn biz_content(&self, env: GatewayEnv) -> Result<BizContent> {
        let biz = BizContent::new()
            .field("out_trade_no", self.out_trade_no.as_str())
            .field("total_amount", wire_amount("total_amount", self.total_amount)?)
            .field("subject", self.subject.as_str())
            .non_empty("store_id", &self.store_id)
            .non_empty("body", &self.body)
            .non_empty("buyer_id", &self.buyer_id)
            .non_empty("buyer_logon_id", &self.buyer_logon_id)
            .non_empty("timeout_express", &self.timeout_express);
        Ok(sub_merchant(biz, env, &self.sub_merchant_id))
    }
}

/// Barcode payment for `micro_pay`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayRequest {
    pub out_trade_no: String,
    /// Amount in cents.
    pub total_amount: i64,
    pub subject: String,
    /// Code scanned from the buyer's wallet.
    pub auth_code: String,
    /// `bar_code` or `wave_code`.
    pub scene: String,
    pub body: String,
    pub store_id: String,
    pub timeout_express: String,
    /// Sent as `sub_merchant.merchant_id` outside the sandbox.
    pub sub_merchant_id: String,
    /// Overrides the client's default notify URL.
    pub notify_url: Option<String>,
}

impl PayRequest {
    pub fn new(
        out_trade_no: impl Into<String>,
        total_amount: i64,
        subject: impl Into<String>,
        auth_code: impl Into<String>,
    ) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            total_amount,
            subject: subject.into(),
            auth_code: auth_code.into(),
            scene: BAR_CODE_SCENE.to_string(),
            body: String::new(),
            store_id: String::new(),
            timeout_express: String::new(),
            sub_merchant_id: String::new(),
            notify_url: None,
        }
    }

    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = scene.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    pub fn with_timeout_express(mut self, timeout: impl Into<String>) -> Self {
        self.timeout_express = timeout.into();
        self
    }

    pub fn with_sub_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.sub_merchant_id = merchant_id.into();
        self
    }

    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    pub(crate) fn biz_content(&self, env: GatewayEnv) -> Result<BizContent> {
        if self.auth_code.is_empty() {
            return Err(AlipayError::invalid_data("auth_code", "must not be empty"));
        }
        let biz = BizContent::new()
            .field("out_trade_no", self.out_trade_no.as_str())
            .field("total_amount", wire_amount("total_amount", self.total_amount)?)
            .field("subject", self.subject.as_str())
            .field("auth_code", self.auth_code.as_str())
            .non_empty("scene", &self.scene)
            .non_empty("store_id", &self.store_id)
            .non_empty("body", &self.body)
            .non_empty("timeout_express", &self.timeout_express);
        Ok(sub_merchant(biz, env, &self.sub_merchant_id))
    }
}

/// Refund of a paid trade, identified by `out_trade_no` or `trade_no`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundRequest {
    pub out_trade_no: String,
    pub trade_no: String,
    /// Amount in cents.
    pub refund_amount: i64,
    pub refund_reason: String,
    /// Distinguishes partial refunds of the same trade.
    pub out_request_no: String,
    pub operator_id: String,
    pub store_id: String,
    pub terminal_id: String,
}

impl RefundRequest {
    pub fn new(out_trade_no: impl Into<String>, refund_amount: i64) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            refund_amount,
            ..Default::default()
        }
    }

    pub fn with_trade_no(mut self, trade_no: impl Into<String>) -> Self {
        self.trade_no = trade_no.into();
        self
    }

    pub fn with_refund_reason(mut self, reason: impl Into<String>) -> Self {
        self.refund_reason = reason.into();
        self
    }

    pub fn with_out_request_no(mut self, request_no: impl Into<String>) -> Self {
        self.out_request_no = request_no.into();
        self
    }

    pub fn with_operator_id(mut self, operator_id: impl Into<String>) -> Self {
        self.operator_id = operator_id.into();
        self
    }

    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    pub fn with_terminal_id(mut self, terminal_id: impl Into<String>) -> Self {
        self.terminal_id = terminal_id.into();
        self
    }

    pub(crate) fn biz_content(&self) -> Result<BizContent> {
        require_trade_id(&self.out_trade_no, &self.trade_no)?;
        Ok(BizContent::new()
            .non_empty("out_trade_no", &self.out_trade_no)
            .non_empty("trade_no", &self.trade_no)
            .field("refund_amount", wire_amount("refund_amount", self.refund_amount)?)
            .non_empty("refund_reason", &self.refund_reason)
            .non_empty("out_request_no", &self.out_request_no)
            .non_empty("operator_id", &self.operator_id)
            .non_empty("store_id", &self.store_id)
            .non_empty("terminal_id", &self.terminal_id))
    }
}

/// Lookup of one refund.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefundQueryRequest {
    pub out_trade_no: String,
    pub trade_no: String,
    /// `out_request_no` of the refund; the gateway falls back to
    /// `out_trade_no` when empty.
    pub out_request_no: String,
}

impl RefundQueryRequest {
    pub fn new(out_trade_no: impl Into<String>, out_request_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            out_request_no: out_request_no.into(),
            ..Default::default()
        }
    }

    pub fn with_trade_no(mut self, trade_no: impl Into<String>) -> Self {
        self.trade_no = trade_no.into();
        self
    }

    pub(crate) fn biz_content(&self) -> Result<BizContent> {
        require_trade_id(&self.out_trade_no, &self.trade_no)?;
        Ok(BizContent::new()
            .non_empty("out_trade_no", &self.out_trade_no)
            .non_empty("trade_no", &self.trade_no)
            .non_empty("out_request_no", &self.out_request_no))
    }
}

fn require_trade_id(out_trade_no: &str, trade_no: &str) -> Result<()> {
    if out_trade_no.is_empty() && trade_no.is_empty() {
        return Err(AlipayError::invalid_data(
            "out_trade_no",
            "either out_trade_no or trade_no is required",
        ));
    }
    Ok(())
}
