//! Business payloads (`biz_content`).
//!
//! Each endpoint describes its business fields as a [`BizContent`], which
//! serializes to the JSON string carried in the envelope's `biz_content`
//! entry. Key order inside the payload is insertion order; it does not
//! matter to the gateway because the payload travels as one opaque string
//! value of the signed envelope.

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::{AlipayError, Result};

/// A single business value.
#[derive(Clone, Debug, PartialEq)]
pub enum BizValue {
    /// JSON string.
    Str(String),
    /// JSON integer.
    Int(i64),
    /// JSON number. Must be finite to serialize.
    Float(f64),
    /// JSON boolean.
    Bool(bool),
    /// Nested object.
    Map(BizContent),
    /// JSON array.
    List(Vec<BizValue>),
}

impl Serialize for BizValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => Err(S::Error::custom(format!("non-finite number {}", f))),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Map(content) => content.serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<&str> for BizValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for BizValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for BizValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for BizValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for BizValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for BizValue {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for BizValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for BizValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<BizContent> for BizValue {
    fn from(content: BizContent) -> Self {
        Self::Map(content)
    }
}

impl<V: Into<BizValue>> From<Vec<V>> for BizValue {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// An ordered JSON object of business fields with unique keys.
///
/// # Example
///
/// ```
/// use alipay_lib::BizContent;
///
/// let biz = BizContent::new()
///     .field("out_trade_no", "T123")
///     .non_empty("store_id", "");
/// assert_eq!(biz.to_json().unwrap(), r#"{"out_trade_no":"T123"}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BizContent {
    fields: Vec<(String, BizValue)>,
}

impl BizContent {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Re-setting a key replaces its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<BizValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn field(mut self, key: impl Into<String>, value: impl Into<BizValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a string field only when it is non-empty.
    pub fn non_empty(self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        if value.is_empty() {
            self
        } else {
            self.field(key, value)
        }
    }

    /// Set a field only when a value is present.
    pub fn optional<V: Into<BizValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&BizValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to the JSON string placed in `biz_content`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AlipayError::Serialization(e.to_string()))
    }
}

impl Serialize for BizContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<BizValue>> FromIterator<(K, V)> for BizContent {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut content = Self::new();
        for (k, v) in iter {
            content.insert(k, v);
        }
        content
    }
}
