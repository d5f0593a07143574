//! Trade commands - calls against the configured gateway

use alipay_lib::trade::{RefundQueryRequest, RefundRequest};
use anyhow::Result;
use serde_json::Value;

use crate::ui;

fn report(title: &str, code: &str, msg: &str, sub_msg: Option<&str>, result: Value) {
    if code == alipay_lib::trade::SUCCESS_CODE {
        ui::success(&format!("{}: {}", title, msg));
    } else {
        ui::warning(&format!(
            "{}: {} {}{}",
            title,
            code,
            msg,
            sub_msg.map(|s| format!(" ({})", s)).unwrap_or_default()
        ));
    }
    ui::json(&result);
}

pub async fn query(out_trade_no: &str) -> Result<()> {
    let client = super::client_from_env()?;
    let r = client.query_order(out_trade_no).await?.result;
    if let Some(cents) = r.total_amount_cents() {
        ui::key_value("Total (cents)", &cents.to_string());
    }
    report("Query", &r.code, &r.msg, r.sub_msg.as_deref(), serde_json::to_value(&r)?);
    Ok(())
}

pub async fn cancel(out_trade_no: &str) -> Result<()> {
    let client = super::client_from_env()?;
    let r = client.cancel_order(out_trade_no).await?.result;
    report("Cancel", &r.code, &r.msg, r.sub_msg.as_deref(), serde_json::to_value(&r)?);
    Ok(())
}

pub async fn close(out_trade_no: &str) -> Result<()> {
    let client = super::client_from_env()?;
    let r = client.close_order(out_trade_no).await?.result;
    report("Close", &r.code, &r.msg, r.sub_msg.as_deref(), serde_json::to_value(&r)?);
    Ok(())
}

pub async fn refund(
    out_trade_no: &str,
    amount: i64,
    reason: Option<String>,
    request_no: Option<String>,
) -> Result<()> {
    let client = super::client_from_env()?;
    let mut request = RefundRequest::new(out_trade_no, amount);
    if let Some(reason) = reason {
        request = request.with_refund_reason(reason);
    }
    if let Some(request_no) = request_no {
        request = request.with_out_request_no(request_no);
    }

    let r = client.refund(&request).await?.result;
    report("Refund", &r.code, &r.msg, r.sub_msg.as_deref(), serde_json::to_value(&r)?);
    Ok(())
}

pub async fn refund_query(out_trade_no: &str, request_no: &str) -> Result<()> {
    let client = super::client_from_env()?;
    let r = client
        .refund_query(&RefundQueryRequest::new(out_trade_no, request_no))
        .await?
        .result;
    report("Refund query", &r.code, &r.msg, r.sub_msg.as_deref(), serde_json::to_value(&r)?);
    Ok(())
}
