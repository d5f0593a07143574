//! Key pairs and gateway-signed bodies.

use std::sync::OnceLock;

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::crypto::{self, Credentials, SignType};
use crate::params::{Params, SIGN, SIGN_TYPE};

const APP_PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/app_private_key.pem");
const APP_PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/app_public_key.pem");
const GATEWAY_PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/gateway_private_key.pem");
const GATEWAY_PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/gateway_public_key.pem");

/// App id used throughout the tests.
pub const TEST_APP_ID: &str = "2015081700218350";

/// Message signed by the gateway fixture key for the known-answer vectors.
pub const KNOWN_ANSWER_MESSAGE: &str = r#"{"code":"10000","msg":"Success"}"#;

/// `RSA` (SHA-1) signature of [`KNOWN_ANSWER_MESSAGE`] under the gateway key.
pub const KNOWN_ANSWER_RSA: &str = "OC8n5ryirRmTwrQ6gGKk+jb9N1sGL85Qp7o9MibnRoWOECLUPI7VPH2NYq8ghKQQFRxpGy8nVr9fKZ+rQFrBdzyNt4fekMjMfmODYiCDCM2ZjU5Ht3D35HTLh+sijQ6/FwXAqhziZZiSx34t8XleMRCp85rn6GlJCf38dqFH+8Y=";

/// `RSA2` (SHA-256) signature of [`KNOWN_ANSWER_MESSAGE`] under the gateway key.
pub const KNOWN_ANSWER_RSA2: &str = "pp5+4BJVBUQSJrLwKrlnBF4OX8fWVIRI+M0vZMpvjwI5S8I+X1eT9TpJgO8411Lrwp4UztgPqTIO1QelHFeN5Kh5G6HKODEy7gW3nL8PwrXpPmgkCNhGOZJWxOYJW0a97MWmBZGU94s33XfA2BuOUXO/rizqdhe8t22okFlBe8A=";

/// An RSA key pair.
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    fn from_pem(private_pem: &str, public_pem: &str) -> Self {
        Self {
            private: crypto::parse_private_key(private_pem).unwrap(),
            public: crypto::parse_public_key(public_pem).unwrap(),
        }
    }

    /// Private half.
    pub fn private(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Public half.
    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }
}

/// Fixed 1024-bit key pairs, parsed once per process.
pub struct TestKeys;

impl TestKeys {
    /// The merchant's key pair. Requests are signed with its private half.
    pub fn merchant() -> &'static KeyPair {
        static KEYS: OnceLock<KeyPair> = OnceLock::new();
        KEYS.get_or_init(|| KeyPair::from_pem(APP_PRIVATE_KEY_PEM, APP_PUBLIC_KEY_PEM))
    }

    /// The gateway's key pair. Responses and notifications are signed with
    /// its private half.
    pub fn gateway() -> &'static KeyPair {
        static KEYS: OnceLock<KeyPair> = OnceLock::new();
        KEYS.get_or_init(|| KeyPair::from_pem(GATEWAY_PRIVATE_KEY_PEM, GATEWAY_PUBLIC_KEY_PEM))
    }

    /// Merchant signing key paired with the gateway public key.
    pub fn credentials() -> Credentials {
        Credentials::new(
            Self::merchant().private().clone(),
            Self::gateway().public().clone(),
        )
    }

    /// PEM text of the merchant private key and gateway public key.
    pub fn credential_pems() -> (&'static str, &'static str) {
        (APP_PRIVATE_KEY_PEM, GATEWAY_PUBLIC_KEY_PEM)
    }
}

/// A gateway response body with `content` under `response_key`, signed by
/// the gateway key over `content` exactly as given.
///
/// `content` must be a JSON object.
pub fn signed_response(response_key: &str, content: &str, sign_type: SignType) -> Vec<u8> {
    let sign = crypto::sign(TestKeys::gateway().private(), sign_type, content.as_bytes()).unwrap();
    format!(r#"{{"{}":{},"sign":"{}"}}"#, response_key, content, sign).into_bytes()
}

/// A form-encoded notification carrying `fields`, signed by the gateway key.
pub fn signed_notification(fields: &Params, sign_type: SignType) -> Vec<u8> {
    let sign = crypto::sign(
        TestKeys::gateway().private(),
        sign_type,
        fields.encode(false).as_bytes(),
    )
    .unwrap();
    fields
        .clone()
        .with(SIGN_TYPE, sign_type.as_str())
        .with(SIGN, sign)
        .encode(true)
        .into_bytes()
}
