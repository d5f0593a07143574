//! Flat key/value parameter sets and their canonical encoding.
//!
//! The canonical form is the exact byte sequence that gets signed:
//! entries sorted ascending by key (byte-wise), rendered as `key=value`,
//! joined with `&`. Entries whose value is empty are left out, since the
//! gateway treats absent and empty as the same thing.
//!
//! The encoder does not know about `sign` / `sign_type`. Callers remove
//! those before asking for a sign-target string.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::{AlipayError, Result};

/// Name of the signature field.
pub const SIGN: &str = "sign";

/// Name of the signature algorithm field.
pub const SIGN_TYPE: &str = "sign_type";

/// A parameter set: unique string keys mapped to plain string values.
///
/// Nested structures must already be serialized to a string before they
/// are inserted (see [`crate::biz::BizContent`]).
///
/// # Example
///
/// ```
/// use alipay_lib::Params;
///
/// let params: Params = [("b", "2"), ("a", "1"), ("c", "")].into_iter().collect();
/// assert_eq!(params.encode(false), "a=1&b=2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove an entry, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Whether the key is present (even with an empty value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries, empty values included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical encoding.
    ///
    /// With `url_encode` set, each value is percent-encoded, which is the
    /// form used for the request body. Without it, values are emitted
    /// literally, which is the form that gets signed.
    pub fn encode(&self, url_encode: bool) -> String {
        let mut out = String::new();
        for (key, value) in self.0.iter().filter(|(_, v)| !v.is_empty()) {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            if url_encode {
                out.push_str(&urlencoding::encode(value));
            } else {
                out.push_str(value);
            }
        }
        out
    }

    /// Split off the signature fields, returning `(sign, rest)`.
    ///
    /// `sign_type` is discarded: it is never part of the signed content.
    pub fn split_signature(mut self) -> (Option<String>, Params) {
        let sign = self.remove(SIGN);
        self.remove(SIGN_TYPE);
        (sign, self)
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// When a key repeats, the first occurrence wins.
    pub fn from_form(raw: &[u8]) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)
            .map_err(|e| AlipayError::Format(format!("form body: {}", e)))?;

        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            map.entry(key).or_insert(value);
        }
        Ok(Self(map))
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, String>> for Params {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sorts_by_key() {
        let params = Params::new()
            .with("timestamp", "2016-01-10 14:15:18")
            .with("app_id", "2015081700218350")
            .with("method", "alipay.trade.query");

        assert_eq!(
            params.encode(false),
            "app_id=2015081700218350&method=alipay.trade.query&timestamp=2016-01-10 14:15:18"
        );
    }

    #[test]
    fn test_encode_insertion_order_irrelevant() {
        let forward: Params = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        let backward: Params = [("c", "3"), ("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(forward.encode(false), backward.encode(false));
        assert_eq!(forward.encode(true), backward.encode(true));
    }

    #[test]
    fn test_encode_skips_empty_values() {
        let with_empty: Params = [("a", ""), ("b", "2")].into_iter().collect();
        let without: Params = [("b", "2")].into_iter().collect();
        assert_eq!(with_empty.encode(false), without.encode(false));
        assert_eq!(with_empty.encode(false), "b=2");
        assert_eq!(Params::new().with("x", "").encode(true), "");
    }

    #[test]
    fn test_encode_byte_wise_order() {
        // Uppercase sorts before lowercase, '_' (0x5f) before 'a'.
        let params: Params = [("b", "1"), ("B", "2"), ("a_b", "3"), ("ab", "4")]
            .into_iter()
            .collect();
        assert_eq!(params.encode(false), "B=2&a_b=3&ab=4&b=1");
    }

    #[test]
    fn test_encode_url_mode_escapes_values_only() {
        let params = Params::new()
            .with("biz_content", r#"{"out_trade_no":"T123"}"#)
            .with("timestamp", "2024-01-01 12:00:00");

        assert_eq!(
            params.encode(true),
            "biz_content=%7B%22out_trade_no%22%3A%22T123%22%7D&timestamp=2024-01-01%2012%3A00%3A00"
        );
        assert_eq!(
            params.encode(false),
            r#"biz_content={"out_trade_no":"T123"}&timestamp=2024-01-01 12:00:00"#
        );
    }

    #[test]
    fn test_split_signature() {
        let params = Params::new()
            .with("trade_status", "TRADE_SUCCESS")
            .with(SIGN, "abc")
            .with(SIGN_TYPE, "RSA");

        let (sign, rest) = params.split_signature();
        assert_eq!(sign.as_deref(), Some("abc"));
        assert!(!rest.contains_key(SIGN));
        assert!(!rest.contains_key(SIGN_TYPE));
        assert_eq!(rest.get("trade_status"), Some("TRADE_SUCCESS"));
    }

    #[test]
    fn test_from_form_decodes_escapes() {
        let params =
            Params::from_form(b"subject=car+wash&total_amount=1.00&gmt_create=2016-01-10%2014%3A14%3A57")
                .unwrap();
        assert_eq!(params.get("subject"), Some("car wash"));
        assert_eq!(params.get("total_amount"), Some("1.00"));
        assert_eq!(params.get("gmt_create"), Some("2016-01-10 14:14:57"));
    }

    #[test]
    fn test_from_form_first_occurrence_wins() {
        let params = Params::from_form(b"a=1&a=2&b=3").unwrap();
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_form_round_trip_through_url_mode() {
        let original = Params::new()
            .with("fund_bill_list", r#"[{"amount":"1.00","fundChannel":"ALIPAYACCOUNT"}]"#)
            .with("subject", "汽车洗车 & 好车店")
            .with("total_amount", "1.00");

        let decoded = Params::from_form(original.encode(true).as_bytes()).unwrap();
        assert_eq!(decoded, original);
    }
}
