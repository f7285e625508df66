// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TNet value type system.
//!
//! Provides the closed value representation shared by the encoder and the
//! decoder. All variants are serde-serializable.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Tag;

/// Wire format for date-time bodies (`yyyy-MM-ddTHH:mm:ss.fff`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// String-keyed mapping that keeps insertion order.
///
/// Decoding preserves wire order and encoding emits insertion order, so a
/// decoded mapping re-encodes to the same bytes.
pub type TnetMap = IndexMap<String, TnetValue>;

/// A single value that can be encoded to, or decoded from, one TNet unit.
///
/// # Design Principles
///
/// - **Closed set**: one variant per wire tag, dispatch is exhaustive
/// - **Owned types**: owned `String`, `Vec<u8>` and containers
/// - **Ordered mappings**: [`TnetMap`] keeps keys in insertion order
///
/// Date-times travel with millisecond precision. The `From` conversions
/// truncate to milliseconds; a `DateTime` built directly with finer
/// precision is truncated when encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TnetValue {
    // `0:~`
    Null,

    // UTF-8 string
    Str(String),

    // 64-bit signed integer
    Int(i64),

    // Double-precision float
    Float(f64),

    Bool(bool),

    // Calendar timestamp without zone
    DateTime(NaiveDateTime),

    Guid(Uuid),

    // Raw bytes (`*` tag)
    Bytes(Vec<u8>),

    // Ordered list of values
    List(Vec<TnetValue>),

    // String-keyed mapping
    Dict(TnetMap),
}

impl TnetValue {
    // ========================================================================
    // Convenience Constructors
    // ========================================================================

    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        TnetValue::Str(s.into())
    }

    /// Create a binary value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        TnetValue::Bytes(data.into())
    }

    /// Create a list from anything convertible to values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TnetValue>,
    {
        TnetValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Create a mapping from key/value pairs, in iteration order.
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TnetValue>,
    {
        TnetValue::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create a date-time value truncated to millisecond precision.
    pub fn datetime(dt: NaiveDateTime) -> Self {
        TnetValue::DateTime(dt.trunc_subsecs(3))
    }

    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, TnetValue::Null)
    }

    /// Check if this value is a container type (list or dict).
    pub fn is_container(&self) -> bool {
        matches!(self, TnetValue::List(_) | TnetValue::Dict(_))
    }

    /// Check if this value is a scalar (anything but null and containers).
    pub fn is_scalar(&self) -> bool {
        !self.is_null() && !self.is_container()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TnetValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TnetValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (integers and floats).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TnetValue::Int(v) => Some(*v as f64),
            TnetValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TnetValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner date-time.
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            TnetValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get the inner GUID.
    pub fn as_guid(&self) -> Option<&Uuid> {
        match self {
            TnetValue::Guid(g) => Some(g),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TnetValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner list.
    pub fn as_list(&self) -> Option<&[TnetValue]> {
        match self {
            TnetValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the inner mapping.
    pub fn as_dict(&self) -> Option<&TnetMap> {
        match self {
            TnetValue::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&TnetValue> {
        self.as_dict().and_then(|map| map.get(key))
    }

    // ========================================================================
    // Codec-Specific Helpers
    // ========================================================================

    /// Get the wire tag this value encodes with.
    pub fn tag(&self) -> Tag {
        match self {
            TnetValue::Null => Tag::Null,
            TnetValue::Str(_) => Tag::String,
            TnetValue::Int(_) => Tag::Integer,
            TnetValue::Float(_) => Tag::Float,
            TnetValue::Bool(_) => Tag::Boolean,
            TnetValue::DateTime(_) => Tag::DateTime,
            TnetValue::Guid(_) => Tag::Guid,
            TnetValue::Bytes(_) => Tag::Binary,
            TnetValue::List(_) => Tag::List,
            TnetValue::Dict(_) => Tag::Dict,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        self.tag().as_str()
    }
}

impl fmt::Display for TnetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TnetValue::Null => write!(f, "null"),
            TnetValue::Str(v) => write!(f, "\"{v}\""),
            TnetValue::Int(v) => write!(f, "{v}"),
            TnetValue::Float(v) => write!(f, "{v}"),
            TnetValue::Bool(v) => write!(f, "{v}"),
            TnetValue::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
            TnetValue::Guid(v) => write!(f, "{}", v.hyphenated()),
            TnetValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            TnetValue::List(v) => write!(f, "[{} elements]", v.len()),
            TnetValue::Dict(v) => write!(f, "{{{} entries}}", v.len()),
        }
    }
}

// =============================================================================
// Host Conversions
// =============================================================================

impl From<&str> for TnetValue {
    fn from(v: &str) -> Self {
        TnetValue::Str(v.to_string())
    }
}

impl From<String> for TnetValue {
    fn from(v: String) -> Self {
        TnetValue::Str(v)
    }
}

impl From<i64> for TnetValue {
    fn from(v: i64) -> Self {
        TnetValue::Int(v)
    }
}

impl From<i32> for TnetValue {
    fn from(v: i32) -> Self {
        TnetValue::Int(i64::from(v))
    }
}

impl From<i16> for TnetValue {
    fn from(v: i16) -> Self {
        TnetValue::Int(i64::from(v))
    }
}

impl From<u32> for TnetValue {
    fn from(v: u32) -> Self {
        TnetValue::Int(i64::from(v))
    }
}

impl From<f64> for TnetValue {
    fn from(v: f64) -> Self {
        TnetValue::Float(v)
    }
}

impl From<f32> for TnetValue {
    fn from(v: f32) -> Self {
        TnetValue::Float(f64::from(v))
    }
}

impl From<bool> for TnetValue {
    fn from(v: bool) -> Self {
        TnetValue::Bool(v)
    }
}

impl From<NaiveDateTime> for TnetValue {
    fn from(v: NaiveDateTime) -> Self {
        TnetValue::datetime(v)
    }
}

impl From<DateTime<Utc>> for TnetValue {
    fn from(v: DateTime<Utc>) -> Self {
        TnetValue::datetime(v.naive_utc())
    }
}

impl From<Uuid> for TnetValue {
    fn from(v: Uuid) -> Self {
        TnetValue::Guid(v)
    }
}

impl From<Vec<TnetValue>> for TnetValue {
    fn from(v: Vec<TnetValue>) -> Self {
        TnetValue::List(v)
    }
}

impl From<TnetMap> for TnetValue {
    fn from(v: TnetMap) -> Self {
        TnetValue::Dict(v)
    }
}

impl<T: Into<TnetValue>> From<Option<T>> for TnetValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(TnetValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_nano_opt(13, 45, 7, 123_456_789)
            .unwrap()
    }

    #[test]
    fn test_type_checking() {
        assert!(TnetValue::Null.is_null());
        assert!(!TnetValue::Null.is_scalar());
        assert!(TnetValue::Int(1).is_scalar());
        assert!(TnetValue::List(vec![]).is_container());
        assert!(TnetValue::Dict(TnetMap::new()).is_container());
        assert!(!TnetValue::Str("x".to_string()).is_container());
    }

    #[test]
    fn test_tag_and_type_name() {
        assert_eq!(TnetValue::Null.tag(), Tag::Null);
        assert_eq!(TnetValue::Int(0).tag(), Tag::Integer);
        assert_eq!(TnetValue::bytes(vec![1]).tag(), Tag::Binary);
        assert_eq!(TnetValue::Float(0.0).type_name(), "float");
        assert_eq!(TnetValue::Dict(TnetMap::new()).type_name(), "dict");
        assert_eq!(TnetValue::Guid(Uuid::nil()).type_name(), "guid");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(TnetValue::from("hi").as_str(), Some("hi"));
        assert_eq!(TnetValue::Int(3).as_i64(), Some(3));
        assert_eq!(TnetValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(TnetValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(TnetValue::Float(2.5).as_i64(), None);
        assert_eq!(TnetValue::Bool(true).as_bool(), Some(true));
        assert_eq!(TnetValue::Null.as_str(), None);
        assert_eq!(TnetValue::bytes(b"ab".to_vec()).as_bytes(), Some(&b"ab"[..]));
    }

    #[test]
    fn test_dict_get_and_order() {
        let value = TnetValue::dict([("z", 1), ("a", 2), ("m", 3)]);
        assert_eq!(value.get("a"), Some(&TnetValue::Int(2)));
        assert_eq!(value.get("missing"), None);
        let keys: Vec<&str> = value
            .as_dict()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_list_constructor() {
        let value = TnetValue::list([1, 2, 3]);
        assert_eq!(
            value.as_list(),
            Some(&[TnetValue::Int(1), TnetValue::Int(2), TnetValue::Int(3)][..])
        );
    }

    #[test]
    fn test_datetime_truncated_to_millis() {
        let value = TnetValue::from(sample_datetime());
        let dt = value.as_datetime().unwrap();
        assert_eq!(dt.nanosecond(), 123_000_000);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(TnetValue::from(None::<i64>), TnetValue::Null);
        assert_eq!(TnetValue::from(Some("x")), TnetValue::Str("x".to_string()));
    }

    #[test]
    fn test_small_integer_conversions() {
        assert_eq!(TnetValue::from(-7i16), TnetValue::Int(-7));
        assert_eq!(TnetValue::from(7i32), TnetValue::Int(7));
        assert_eq!(TnetValue::from(u32::MAX), TnetValue::Int(4_294_967_295));
        assert_eq!(TnetValue::from(1.5f32), TnetValue::Float(1.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(TnetValue::Null.to_string(), "null");
        assert_eq!(TnetValue::from("test").to_string(), "\"test\"");
        assert_eq!(TnetValue::Int(-42).to_string(), "-42");
        assert_eq!(TnetValue::Bool(false).to_string(), "false");
        assert_eq!(
            TnetValue::from(sample_datetime()).to_string(),
            "2024-02-29T13:45:07.123"
        );
        assert_eq!(
            TnetValue::Guid(Uuid::nil()).to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(TnetValue::bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
        assert_eq!(TnetValue::List(vec![]).to_string(), "[0 elements]");
        assert_eq!(TnetValue::dict([("a", 1)]).to_string(), "{1 entries}");
    }

    #[test]
    fn test_serialization() {
        let value = TnetValue::dict([("k", TnetValue::list([1, 2]))]);
        let json = serde_json::to_string(&value).unwrap();
        let decoded: TnetValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }
}
