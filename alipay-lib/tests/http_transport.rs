//! Integration tests for the reqwest transport against a mock gateway.
//!
//! ```bash
//! cargo test -p alipay-lib --features http-transport --test http_transport
//! ```

#![cfg(feature = "http-transport")]

mod common;

use std::time::Duration;

use alipay_lib::crypto::SignType;
use alipay_lib::{
    AlipayClient, AlipayError, AlipayErrorCode, GatewayTransport, HttpTransport, Params,
};
use common::{credentials, signed_response, APP_ID};
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const FORM: &str = "application/x-www-form-urlencoded;charset=utf-8";

async fn gateway_client(server: &MockServer) -> AlipayClient<HttpTransport> {
    AlipayClient::new(
        APP_ID,
        format!("{}/gateway.do", server.uri()),
        credentials(),
        HttpTransport::new(5).unwrap(),
    )
}

#[tokio::test]
async fn test_query_order_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gateway.do"))
        .and(header("content-type", FORM))
        .and(body_string_contains("method=alipay.trade.query"))
        .and(body_string_contains("biz_content=%7B%22out_trade_no%22%3A%22T123%22%7D"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(signed_response(
            "alipay_trade_query_response",
            r#"{"code":"10000","msg":"Success","trade_status":"TRADE_SUCCESS","out_trade_no":"T123"}"#,
            SignType::Rsa,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = gateway_client(&server).await;
    let verified = client.query_order("T123").await.unwrap();
    assert!(verified.result.is_success());
    assert_eq!(verified.result.out_trade_no, "T123");
}

#[tokio::test]
async fn test_post_form_returns_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a":1}"#))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(5).unwrap();
    let body = Params::new().with("k", "v w").encode(true);
    let raw = transport.post_form(&server.uri(), body).await.unwrap();
    assert_eq!(raw, br#"{"a":1}"#);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].body, b"k=v%20w");
}

#[tokio::test]
async fn test_server_error_is_retryable_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = gateway_client(&server).await;
    let err = client.query_order("T1").await.unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::HttpStatus);
    assert!(err.is_retryable());
    assert!(err.to_string().contains("bad gateway"));
}

#[tokio::test]
async fn test_client_error_status_not_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = gateway_client(&server).await.close_order("T1").await.unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::HttpStatus);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_timeout_maps_to_connection_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(1).unwrap();
    let err = transport
        .post_form(&server.uri(), String::new())
        .await
        .unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::ConnectionTimeout);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_huge_configured_timeout_reported_without_overflow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let transport = HttpTransport::with_client(client, u64::MAX);
    let err = transport
        .post_form(&server.uri(), String::new())
        .await
        .unwrap_err();
    match err {
        AlipayError::ConnectionTimeout { timeout_ms, .. } => assert_eq!(timeout_ms, u64::MAX),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_gateway_is_connection_failure() {
    // Nothing listens on port 9 (discard) in the test environment.
    let transport = HttpTransport::new(2).unwrap();
    let err = transport
        .post_form("http://127.0.0.1:9/gateway.do", String::new())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(
        err.code(),
        AlipayErrorCode::ConnectionFailed | AlipayErrorCode::Transport
    ));
}

#[tokio::test]
async fn test_forged_http_response_rejected() {
    let server = MockServer::start().await;

    let forged = String::from_utf8(signed_response(
        "alipay_trade_cancel_response",
        r#"{"code":"40004","msg":"Business Failed"}"#,
        SignType::Rsa,
    ))
    .unwrap()
    .replace("40004", "10000");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(forged))
        .mount(&server)
        .await;

    let err = gateway_client(&server).await.cancel_order("T1").await.unwrap_err();
    assert_eq!(err.code(), AlipayErrorCode::InvalidSignature);
}
