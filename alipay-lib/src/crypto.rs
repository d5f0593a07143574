//! RSA signing and verification over canonical byte strings.
//!
//! [`sign`] and [`verify`] are pure: they never log and hold no state.
//! Signatures travel as standard base64 text.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::{AlipayError, Result};

/// Signature algorithm tag carried in the envelope's `sign_type` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignType {
    /// PKCS#1 v1.5 with SHA-1.
    #[default]
    #[serde(rename = "RSA")]
    Rsa,
    /// PKCS#1 v1.5 with SHA-256.
    #[serde(rename = "RSA2")]
    Rsa2,
}

impl SignType {
    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Rsa2 => "RSA2",
        }
    }

    fn scheme_and_digest(&self, message: &[u8]) -> (Pkcs1v15Sign, Vec<u8>) {
        match self {
            Self::Rsa => (Pkcs1v15Sign::new::<Sha1>(), Sha1::digest(message).to_vec()),
            Self::Rsa2 => (Pkcs1v15Sign::new::<Sha256>(), Sha256::digest(message).to_vec()),
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = AlipayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RSA" => Ok(Self::Rsa),
            "RSA2" => Ok(Self::Rsa2),
            other => Err(AlipayError::Config(format!("unknown sign type: {}", other))),
        }
    }
}

/// Sign `message` with the merchant's private key and return base64 text.
pub fn sign(key: &RsaPrivateKey, sign_type: SignType, message: &[u8]) -> Result<String> {
    let (scheme, digest) = sign_type.scheme_and_digest(message);
    let signature = key
        .sign(scheme, &digest)
        .map_err(|e| AlipayError::Signing(e.to_string()))?;
    Ok(BASE64.encode(signature))
}

/// Check a base64 `signature` over `message` against the gateway's public key.
///
/// Malformed base64 fails with [`AlipayError::SignatureEncoding`]; a wrong
/// key, wrong algorithm, or altered message fails with
/// [`AlipayError::InvalidSignature`].
pub fn verify(key: &RsaPublicKey, sign_type: SignType, message: &[u8], signature: &str) -> Result<()> {
    let raw = BASE64
        .decode(signature.trim())
        .map_err(|e| AlipayError::SignatureEncoding(e.to_string()))?;
    let (scheme, digest) = sign_type.scheme_and_digest(message);
    key.verify(scheme, &digest, &raw)
        .map_err(|e| AlipayError::InvalidSignature(e.to_string()))
}

/// Parse a private key from PKCS#1 PEM, PKCS#8 PEM, or bare base64 DER.
pub fn parse_private_key(text: &str) -> Result<RsaPrivateKey> {
    let text = text.trim();
    let parsed = if text.contains("BEGIN RSA PRIVATE KEY") {
        RsaPrivateKey::from_pkcs1_pem(text).map_err(|e| e.to_string())
    } else if text.contains("BEGIN PRIVATE KEY") {
        RsaPrivateKey::from_pkcs8_pem(text).map_err(|e| e.to_string())
    } else {
        decode_bare_der(text).and_then(|der| {
            RsaPrivateKey::from_pkcs8_der(&der)
                .or_else(|_| RsaPrivateKey::from_pkcs1_der(&der))
                .map_err(|e| e.to_string())
        })
    };
    parsed.map_err(|e| AlipayError::Config(format!("private key: {}", e)))
}

/// Parse a public key from SPKI PEM, PKCS#1 PEM, or bare base64 DER.
pub fn parse_public_key(text: &str) -> Result<RsaPublicKey> {
    let text = text.trim();
    let parsed = if text.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(text).map_err(|e| e.to_string())
    } else if text.contains("BEGIN PUBLIC KEY") {
        RsaPublicKey::from_public_key_pem(text).map_err(|e| e.to_string())
    } else {
        decode_bare_der(text).and_then(|der| {
            RsaPublicKey::from_public_key_der(&der)
                .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
                .map_err(|e| e.to_string())
        })
    };
    parsed.map_err(|e| AlipayError::Config(format!("public key: {}", e)))
}

/// Load the merchant's private key from disk.
pub fn load_private_key(path: impl AsRef<Path>) -> Result<RsaPrivateKey> {
    parse_private_key(&read_key_file(path.as_ref())?)
}

/// Load the gateway's public key from disk.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<RsaPublicKey> {
    parse_public_key(&read_key_file(path.as_ref())?)
}

fn read_key_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AlipayError::Config(format!("reading {}: {}", path.display(), e)))
}

// Keys pasted from the gateway console are one base64 line, sometimes wrapped.
fn decode_bare_der(text: &str) -> std::result::Result<Vec<u8>, String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64.decode(compact).map_err(|e| e.to_string())
}

/// The key pair owned by one client: our signing key and the gateway's
/// verification key. Immutable after construction.
#[derive(Clone)]
pub struct Credentials {
    signing_key: RsaPrivateKey,
    gateway_key: RsaPublicKey,
}

impl Credentials {
    /// Pair an already-parsed signing key with the gateway's public key.
    pub fn new(signing_key: RsaPrivateKey, gateway_key: RsaPublicKey) -> Self {
        Self {
            signing_key,
            gateway_key,
        }
    }

    /// Parse both keys from text.
    pub fn from_pem(private_key: &str, gateway_public_key: &str) -> Result<Self> {
        Ok(Self::new(
            parse_private_key(private_key)?,
            parse_public_key(gateway_public_key)?,
        ))
    }

    /// Load both keys from disk.
    pub fn load(
        private_key_path: impl AsRef<Path>,
        gateway_public_key_path: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self::new(
            load_private_key(private_key_path)?,
            load_public_key(gateway_public_key_path)?,
        ))
    }

    /// Sign with our private key.
    pub fn sign(&self, sign_type: SignType, message: &[u8]) -> Result<String> {
        sign(&self.signing_key, sign_type, message)
    }

    /// Verify a gateway-originated signature.
    pub fn verify(&self, sign_type: SignType, message: &[u8], signature: &str) -> Result<()> {
        verify(&self.gateway_key, sign_type, message, signature)
    }

    /// The gateway's verification key.
    pub fn gateway_key(&self) -> &RsaPublicKey {
        &self.gateway_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("signing_key", &"<redacted>")
            .field("gateway_key", &self.gateway_key)
            .finish()
    }
}
