//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

use alipay_lib::crypto::{self, Credentials, SignType};
use alipay_lib::{AlipayClient, AlipayError, GatewayTransport, Params, Result};
use async_trait::async_trait;
use rsa::{RsaPrivateKey, RsaPublicKey};

pub const APP_ID: &str = "2015081700218350";
pub const GATEWAY_URL: &str = "https://gateway.test/gateway.do";

const APP_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/app_private_key.pem");
const APP_PUBLIC_KEY_PEM: &str = include_str!("../fixtures/app_public_key.pem");
const GATEWAY_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/gateway_private_key.pem");
const GATEWAY_PUBLIC_KEY_PEM: &str = include_str!("../fixtures/gateway_public_key.pem");

pub fn app_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| crypto::parse_private_key(APP_PRIVATE_KEY_PEM).unwrap())
}

pub fn app_public_key() -> &'static RsaPublicKey {
    static KEY: OnceLock<RsaPublicKey> = OnceLock::new();
    KEY.get_or_init(|| crypto::parse_public_key(APP_PUBLIC_KEY_PEM).unwrap())
}

pub fn gateway_private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| crypto::parse_private_key(GATEWAY_PRIVATE_KEY_PEM).unwrap())
}

/// Merchant signing key with the gateway's public key.
pub fn credentials() -> Credentials {
    Credentials::from_pem(APP_PRIVATE_KEY_PEM, GATEWAY_PUBLIC_KEY_PEM).unwrap()
}

/// Gateway-signed response body.
pub fn signed_response(response_key: &str, content: &str, sign_type: SignType) -> Vec<u8> {
    let sign = crypto::sign(gateway_private_key(), sign_type, content.as_bytes()).unwrap();
    format!(r#"{{"{}":{},"sign":"{}"}}"#, response_key, content, sign).into_bytes()
}

/// Gateway-signed, form-encoded notification body.
pub fn signed_notification(fields: &Params, sign_type: SignType) -> String {
    let sign = crypto::sign(gateway_private_key(), sign_type, fields.encode(false).as_bytes())
        .unwrap();
    fields
        .clone()
        .with("sign_type", sign_type.as_str())
        .with("sign", sign)
        .encode(true)
}

/// Transport that replays queued bodies and keeps every posted form body.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Vec<u8>>>,
    bodies: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn reply(&self, body: impl Into<Vec<u8>>) {
        self.replies.lock().unwrap().push_back(body.into());
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayTransport for ScriptedTransport {
    async fn post_form(&self, _url: &str, body: String) -> Result<Vec<u8>> {
        self.bodies.lock().unwrap().push(body);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AlipayError::Transport("nothing scripted".to_string()))
    }
}

pub fn client() -> (AlipayClient<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::default());
    let client = AlipayClient::new(APP_ID, GATEWAY_URL, credentials(), transport.clone());
    (client, transport)
}
