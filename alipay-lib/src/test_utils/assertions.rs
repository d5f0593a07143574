//! Assertion helpers.

use std::fmt::Debug;

use super::fixtures::TestKeys;
use super::mock_transport::RecordedRequest;
use crate::crypto::{self, SignType};
use crate::{AlipayErrorCode, Result};

/// Assert that `result` failed with `code`.
pub fn assert_error_code<T: Debug>(result: &Result<T>, code: AlipayErrorCode) {
    match result {
        Err(e) => assert_eq!(e.code(), code, "unexpected error: {}", e),
        Ok(value) => panic!("expected {:?}, got Ok({:?})", code, value),
    }
}

/// Assert that `request` calls `method` and carries a valid merchant
/// signature over its other fields.
pub fn assert_signed_request(request: &RecordedRequest, method: &str) {
    let params = request.params();
    assert_eq!(params.get("method"), Some(method), "wrong gateway method");

    let sign_type: SignType = params
        .get("sign_type")
        .unwrap_or_default()
        .parse()
        .unwrap();
    let (sign, unsigned) = params.clone().split_signature();
    let sign = sign.unwrap();
    assert!(!sign.is_empty(), "request carries an empty signature");

    // sign_type is part of the signed envelope.
    let unsigned = unsigned.with("sign_type", sign_type.as_str());
    crypto::verify(
        TestKeys::merchant().public(),
        sign_type,
        unsigned.encode(false).as_bytes(),
        &sign,
    )
    .unwrap();
}
