//! End-to-end client flows against a scripted transport.
//!
//! ```bash
//! cargo test -p alipay-lib --test client_flow
//! ```

mod common;

use std::sync::Arc;

use alipay_lib::crypto::{self, SignType};
use alipay_lib::params::{SIGN, SIGN_TYPE};
use alipay_lib::trade::RefundRequest;
use alipay_lib::{AlipayErrorCode, BizContent, Params, TradeStatus};
use common::{app_private_key, app_public_key, client, signed_notification, signed_response, APP_ID};

// ============================================================================
// Request Builder
// ============================================================================

#[tokio::test]
async fn test_query_wire_body() {
    let (client, transport) = client();
    transport.reply("{}");

    let biz = BizContent::new().field("out_trade_no", "T123");
    client.biz_request("alipay.trade.query", "", &biz).await.unwrap();

    let body = &transport.bodies()[0];
    assert!(body.contains("biz_content=%7B%22out_trade_no%22%3A%22T123%22%7D"));

    let params = Params::from_form(body.as_bytes()).unwrap();
    assert_eq!(params.get("app_id"), Some(APP_ID));
    assert_eq!(params.get("charset"), Some("utf-8"));
    assert_eq!(params.get("version"), Some("1.0"));
    assert_eq!(params.get(SIGN_TYPE), Some("RSA"));
    assert!(!params.contains_key("notify_url"));

    let sign = params.get(SIGN).unwrap().to_string();
    assert!(!sign.is_empty());

    // The signature covers every other field, sign_type included.
    let mut unsigned = params.clone();
    unsigned.remove(SIGN);
    crypto::verify(app_public_key(), SignType::Rsa, unsigned.encode(false).as_bytes(), &sign)
        .unwrap();
}

#[tokio::test]
async fn test_rsa2_envelope_is_tagged() {
    let (client, transport) = client();
    let client = client.with_sign_type(SignType::Rsa2);
    transport.reply("{}");

    client
        .biz_request("alipay.trade.query", "https://shop.test/notify", &BizContent::new())
        .await
        .unwrap();

    let params = Params::from_form(transport.bodies()[0].as_bytes()).unwrap();
    assert_eq!(params.get(SIGN_TYPE), Some("RSA2"));
    assert_eq!(params.get("notify_url"), Some("https://shop.test/notify"));
}

// ============================================================================
// Response Verifier
// ============================================================================

#[tokio::test]
async fn test_query_response_verified() {
    let (client, transport) = client();
    transport.reply(signed_response(
        "alipay_trade_query_response",
        r#"{"code":"10000","msg":"Success","trade_status":"TRADE_SUCCESS","out_trade_no":"T123","total_amount":"88.88"}"#,
        SignType::Rsa,
    ));

    let verified = client.query_order("T123").await.unwrap();
    assert!(verified.result.is_success());
    assert_eq!(verified.result.status(), TradeStatus::TradeSuccess);
    assert_eq!(verified.result.total_amount_cents(), Some(8888));
}

#[test]
fn test_mismatched_response_key_is_format_error() {
    let (client, _) = client();
    let raw = signed_response(
        "alipay_trade_query_response",
        r#"{"code":"10000","msg":"Success"}"#,
        SignType::Rsa,
    );
    let (_, sign) = alipay_lib::response::decode_response::<serde_json::Value>(
        &raw,
        "alipay_trade_query_response",
    )
    .unwrap();

    client
        .verify_response(&raw, &sign, "alipay_trade_query_response")
        .unwrap();
    let err = client
        .verify_response(&raw, &sign, "alipay_trade_close_response")
        .unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::Format);
}

#[tokio::test]
async fn test_response_for_other_method_rejected() {
    let (client, transport) = client();
    transport.reply(signed_response(
        "alipay_trade_query_response",
        r#"{"code":"10000","msg":"Success"}"#,
        SignType::Rsa,
    ));

    let err = client.close_order("T123").await.unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::Format);
}

#[tokio::test]
async fn test_refund_signed_by_wrong_key_rejected() {
    let (client, transport) = client();
    let content = r#"{"code":"10000","msg":"Success","refund_fee":"1.00"}"#;
    // Signed by the merchant key instead of the gateway key.
    let forged = crypto::sign(app_private_key(), SignType::Rsa, content.as_bytes()).unwrap();
    transport.reply(format!(
        r#"{{"alipay_trade_refund_response":{},"sign":"{}"}}"#,
        content, forged
    ));

    let err = client.refund(&RefundRequest::new("T123", 100)).await.unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::InvalidSignature);
}

// ============================================================================
// Notification Parser
// ============================================================================

fn trade_success_fields() -> Params {
    Params::new()
        .with("app_id", APP_ID)
        .with("gmt_payment", "2016-01-10 14:15:18")
        .with("notify_id", "c5be78fb74a7d7f2336582597678a5djuw")
        .with("out_trade_no", "M14524064880000000000003")
        .with("subject", "Car wash & polish")
        .with("total_amount", "1.00")
        .with("trade_status", "TRADE_SUCCESS")
}

#[test]
fn test_notification_round_trip() {
    let (client, _) = client();
    let body = signed_notification(&trade_success_fields(), SignType::Rsa);

    let fields = client.parse_notification(body.as_bytes()).unwrap();
    assert_eq!(fields, trade_success_fields());

    let notification = client.notify(body.as_bytes()).unwrap();
    assert!(notification.is_success());
    assert_eq!(notification.total_fee(), 100);
    assert_eq!(notification.out_trade_no(), Some("M14524064880000000000003"));
}

#[test]
fn test_tampered_total_amount_rejected() {
    let (client, _) = client();
    let body = signed_notification(&trade_success_fields(), SignType::Rsa);
    let tampered = body.replacen("total_amount=1.00", "total_amount=2.00", 1);
    assert_ne!(body, tampered);

    let err = client.parse_notification(tampered.as_bytes()).unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::InvalidSignature);
}

#[test]
fn test_notification_field_order_irrelevant() {
    let (client, _) = client();
    let body = signed_notification(&trade_success_fields(), SignType::Rsa2);
    let client = client.with_sign_type(SignType::Rsa2);

    let mut pairs: Vec<&str> = body.split('&').collect();
    pairs.reverse();
    let reordered = pairs.join("&");

    assert_eq!(
        client.parse_notification(reordered.as_bytes()).unwrap(),
        trade_success_fields()
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_client() {
    let (client, transport) = client();
    for _ in 0..16 {
        transport.reply("{}");
    }
    let client = Arc::new(client);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let biz = BizContent::new()
                    .field("out_trade_no", format!("T{}", i))
                    .field("total_amount", alipay_lib::trade::cents_to_yuan(100 + i));
                client.biz_request("alipay.trade.precreate", "", &biz).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let bodies = transport.bodies();
    assert_eq!(bodies.len(), 16);
    for body in bodies {
        let mut params = Params::from_form(body.as_bytes()).unwrap();
        let sign = params.remove(SIGN).unwrap();
        crypto::verify(app_public_key(), SignType::Rsa, params.encode(false).as_bytes(), &sign)
            .unwrap();
    }
}
