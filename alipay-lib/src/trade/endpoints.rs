//! Endpoint methods on [`AlipayClient`].

use super::{
    OrderRequest, OrderResult, PayRequest, RefundQueryRequest, RefundRequest, RefundResult,
    TradeMethod, TradeQueryResult,
};
use crate::biz::BizContent;
use crate::client::AlipayClient;
use crate::response::Verified;
use crate::transport::GatewayTransport;
use crate::Result;

fn by_out_trade_no(out_trade_no: &str) -> BizContent {
    BizContent::new().field("out_trade_no", out_trade_no)
}

impl<T: GatewayTransport> AlipayClient<T> {
    /// Barcode payment: charge the buyer's scanned `auth_code`.
    pub async fn micro_pay(&self, request: &PayRequest) -> Result<Verified<TradeQueryResult>> {
        let biz = request.biz_content(self.env())?;
        let notify_url = self.resolve_notify_url(request.notify_url.as_deref());
        self.call(TradeMethod::Pay.as_str(), notify_url, &biz).await
    }

    /// QR code pre-order. The QR content is in [`OrderResult::qr_code`].
    pub async fn precreate(&self, request: &OrderRequest) -> Result<Verified<OrderResult>> {
        self.place_order(TradeMethod::Precreate, request).await
    }

    /// Order for an identified buyer (`buyer_id` / `buyer_logon_id`).
    pub async fn create(&self, request: &OrderRequest) -> Result<Verified<OrderResult>> {
        self.place_order(TradeMethod::Create, request).await
    }

    async fn place_order(
        &self,
        method: TradeMethod,
        request: &OrderRequest,
    ) -> Result<Verified<OrderResult>> {
        let biz = request.biz_content(self.env())?;
        let notify_url = self.resolve_notify_url(request.notify_url.as_deref());
        self.call(method.as_str(), notify_url, &biz).await
    }

    /// Look up a trade by merchant order number.
    pub async fn query_order(&self, out_trade_no: &str) -> Result<Verified<TradeQueryResult>> {
        self.call(TradeMethod::Query.as_str(), "", &by_out_trade_no(out_trade_no))
            .await
    }

    /// Cancel a trade, refunding it if it was already paid.
    pub async fn cancel_order(&self, out_trade_no: &str) -> Result<Verified<OrderResult>> {
        self.call(TradeMethod::Cancel.as_str(), "", &by_out_trade_no(out_trade_no))
            .await
    }

    /// Close an unpaid trade.
    pub async fn close_order(&self, out_trade_no: &str) -> Result<Verified<OrderResult>> {
        self.call(TradeMethod::Close.as_str(), "", &by_out_trade_no(out_trade_no))
            .await
    }

    /// Refund part or all of a paid trade.
    pub async fn refund(&self, request: &RefundRequest) -> Result<Verified<RefundResult>> {
        self.call(TradeMethod::Refund.as_str(), "", &request.biz_content()?)
            .await
    }

    /// Status of an earlier refund request.
    pub async fn refund_query(
        &self,
        request: &RefundQueryRequest,
    ) -> Result<Verified<RefundResult>> {
        self.call(TradeMethod::RefundQuery.as_str(), "", &request.biz_content()?)
            .await
    }
}
