//! Gateway response verification.
//!
//! A response body looks like `{"<response_key>":{...},"sign":"..."}`. The
//! gateway signs the inner object exactly as it emitted it, so verification
//! replays those bytes: the span is located by prefix and delimiter search
//! on the raw body and is never re-serialized.
//!
//! The delimiter is the first `},"sign":` after the prefix. A business value
//! containing that literal text would end the span early and the signature
//! check would then fail.

use rsa::RsaPublicKey;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::crypto::{self, SignType};
use crate::params::SIGN;
use crate::{AlipayError, Result};

const SIGN_DELIMITER: &[u8] = b"},\"sign\":";

/// Top-level key the gateway uses when it rejects a request outright.
pub const ERROR_RESPONSE_KEY: &str = "error_response";

/// A decoded result whose signature has been checked, plus the raw body.
#[derive(Clone, Debug)]
pub struct Verified<T> {
    /// Typed response content
    pub result: T,
    /// Response body as received
    pub raw: Vec<u8>,
}

impl<T> Verified<T> {
    /// Consume into the typed result.
    pub fn into_result(self) -> T {
        self.result
    }
}

/// The exact signed bytes of `raw` for `response_key`.
///
/// The span is returned byte for byte, so content that is not valid UTF-8
/// is still verified as sent.
pub fn signed_span(raw: &[u8], response_key: &str) -> Result<Vec<u8>> {
    let prefix = format!("{{\"{}\":{{", response_key);
    let rest = raw.strip_prefix(prefix.as_bytes()).ok_or_else(|| {
        AlipayError::Format(format!("body does not start with {}", prefix))
    })?;

    let end = find(rest, SIGN_DELIMITER)
        .ok_or_else(|| AlipayError::Format("no sign field after response object".to_string()))?;

    let mut span = Vec::with_capacity(end + 2);
    span.push(b'{');
    span.extend_from_slice(&rest[..end]);
    span.push(b'}');
    Ok(span)
}

/// Verify `signature` over the signed span of `raw`.
pub fn verify_response(
    gateway_key: &RsaPublicKey,
    sign_type: SignType,
    raw: &[u8],
    signature: &str,
    response_key: &str,
) -> Result<()> {
    let span = signed_span(raw, response_key)?;
    crypto::verify(gateway_key, sign_type, &span, signature)
}

/// Parse `raw` and return the content under `response_key` with the `sign`
/// value.
///
/// This does not verify anything.
pub fn decode_response<T: DeserializeOwned>(raw: &[u8], response_key: &str) -> Result<(T, String)> {
    let mut body: Map<String, Value> = serde_json::from_slice(raw)
        .map_err(|e| AlipayError::Format(format!("response is not a JSON object: {}", e)))?;

    let content = match body.remove(response_key) {
        Some(content) => content,
        None => return Err(missing_key(&body, response_key)),
    };

    let sign = match body.remove(SIGN) {
        Some(Value::String(sign)) => sign,
        _ => return Err(AlipayError::Format("response carries no sign".to_string())),
    };

    let result = serde_json::from_value(content)
        .map_err(|e| AlipayError::Format(format!("{}: {}", response_key, e)))?;

    Ok((result, sign))
}

fn missing_key(body: &Map<String, Value>, response_key: &str) -> AlipayError {
    let detail = body
        .get(ERROR_RESPONSE_KEY)
        .and_then(|e| e.get("sub_msg").or_else(|| e.get("msg")))
        .and_then(Value::as_str);

    match detail {
        Some(msg) => AlipayError::Format(format!("gateway returned {}: {}", ERROR_RESPONSE_KEY, msg)),
        None => AlipayError::Format(format!("{} missing from response", response_key)),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
