// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON bridge
//!
//! Converts between [`TnetValue`] and `serde_json::Value`.
//!
//! JSON has no date-time, GUID or byte types, so those travel as strings:
//! date-times in wire format, GUIDs hyphenated, bytes as lower-case hex.
//! With `infer_types` set, strings shaped like a wire date-time or a
//! hyphenated GUID come back as typed values.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tnetcodec::encoding::json::JsonBridge;
//! use tnetcodec::TnetValue;
//!
//! let bridge = JsonBridge::new();
//! let json = serde_json::json!({"x": 1, "tags": ["a", null]});
//! let value = bridge.from_json(&json)?;
//! assert_eq!(value.get("x"), Some(&TnetValue::Int(1)));
//! assert_eq!(bridge.to_json(&value)?, json);
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Number, Value};

use super::decoder::{parse_datetime, parse_guid};
use crate::core::value::DATETIME_FORMAT;
use crate::core::{CodecError, Result, TnetMap, TnetValue};

/// Converts values to and from JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBridge {
    /// Turn date-time and GUID shaped strings into typed values
    infer_types: bool,
}

impl JsonBridge {
    /// Create a bridge that keeps every JSON string a string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable date-time and GUID inference in [`from_json`](Self::from_json).
    pub fn with_infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Convert a JSON value into a TNet value.
    ///
    /// Integers outside the `i64` range are rejected rather than rounded.
    pub fn from_json(&self, value: &Value) -> Result<TnetValue> {
        match value {
            Value::Null => Ok(TnetValue::Null),
            Value::Bool(b) => Ok(TnetValue::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(TnetValue::Int(i))
                } else if n.is_u64() {
                    Err(CodecError::unsupported_value(
                        "integer",
                        format!("{n} does not fit in a signed 64-bit integer"),
                    ))
                } else {
                    n.as_f64().map(TnetValue::Float).ok_or_else(|| {
                        CodecError::unsupported_value("float", format!("unreadable number {n}"))
                    })
                }
            }
            Value::String(s) => Ok(self.string_value(s)),
            Value::Array(items) => items
                .iter()
                .map(|item| self.from_json(item))
                .collect::<Result<Vec<_>>>()
                .map(TnetValue::List),
            Value::Object(obj) => {
                let mut map = TnetMap::with_capacity(obj.len());
                for (key, item) in obj {
                    map.insert(key.clone(), self.from_json(item)?);
                }
                Ok(TnetValue::Dict(map))
            }
        }
    }

    /// Convert a TNet value into JSON.
    pub fn to_json(&self, value: &TnetValue) -> Result<Value> {
        let json = match value {
            TnetValue::Null => Value::Null,
            TnetValue::Str(s) => Value::String(s.clone()),
            TnetValue::Int(i) => Value::Number(Number::from(*i)),
            TnetValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
                CodecError::unsupported_value("float", format!("{f} is not representable in JSON"))
            })?,
            TnetValue::Bool(b) => Value::Bool(*b),
            TnetValue::DateTime(dt) => Value::String(dt.format(DATETIME_FORMAT).to_string()),
            TnetValue::Guid(g) => Value::String(g.hyphenated().to_string()),
            TnetValue::Bytes(b) => Value::String(hex::encode(b)),
            TnetValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.to_json(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            TnetValue::Dict(map) => {
                let mut obj = Map::with_capacity(map.len());
                for (key, item) in map {
                    obj.insert(key.clone(), self.to_json(item)?);
                }
                Value::Object(obj)
            }
        };
        Ok(json)
    }

    /// Render a TNet value as JSON text.
    pub fn to_json_string(&self, value: &TnetValue, pretty: bool) -> Result<String> {
        let json = self.to_json(value)?;
        let text = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        text.map_err(|e| CodecError::unsupported_value(value.type_name(), e.to_string()))
    }

    fn string_value(&self, s: &str) -> TnetValue {
        if self.infer_types {
            if let Ok(dt) = parse_datetime(0, s.as_bytes()) {
                return TnetValue::DateTime(dt);
            }
            if let Ok(guid) = parse_guid(0, s.as_bytes()) {
                return TnetValue::Guid(guid);
            }
        }
        TnetValue::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_from_json_scalars() {
        let bridge = JsonBridge::new();
        assert_eq!(bridge.from_json(&json!(null)).unwrap(), TnetValue::Null);
        assert_eq!(bridge.from_json(&json!(true)).unwrap(), TnetValue::Bool(true));
        assert_eq!(bridge.from_json(&json!(-3)).unwrap(), TnetValue::Int(-3));
        assert_eq!(bridge.from_json(&json!(2.5)).unwrap(), TnetValue::Float(2.5));
        assert_eq!(bridge.from_json(&json!("x")).unwrap(), TnetValue::from("x"));
    }

    #[test]
    fn test_from_json_rejects_large_unsigned() {
        let bridge = JsonBridge::new();
        let err = bridge.from_json(&json!(u64::MAX)).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedValue { type_name: "integer", .. }));
    }

    #[test]
    fn test_object_order_preserved() {
        let bridge = JsonBridge::new();
        let value = bridge
            .from_json(&serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap())
            .unwrap();
        let keys: Vec<&str> = value.as_dict().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(
            bridge.to_json_string(&value, false).unwrap(),
            r#"{"z":1,"a":2}"#
        );
    }

    #[test]
    fn test_to_json_typed_values() {
        let bridge = JsonBridge::new();
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 6)
            .unwrap();
        let value = TnetValue::list([
            TnetValue::DateTime(dt),
            TnetValue::Guid(Uuid::nil()),
            TnetValue::bytes(vec![0xde, 0xad]),
        ]);
        assert_eq!(
            bridge.to_json(&value).unwrap(),
            json!([
                "2024-01-02T03:04:05.006",
                "00000000-0000-0000-0000-000000000000",
                "dead"
            ])
        );
    }

    #[test]
    fn test_to_json_rejects_non_finite() {
        let bridge = JsonBridge::new();
        let err = bridge.to_json(&TnetValue::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedValue { type_name: "float", .. }));
    }

    #[test]
    fn test_infer_types() {
        let plain = JsonBridge::new();
        let inferring = JsonBridge::new().with_infer_types(true);
        let json = json!(["2024-01-02T03:04:05.006", "00000000-0000-0000-0000-000000000000", "hi"]);

        let kept = plain.from_json(&json).unwrap();
        assert!(kept.as_list().unwrap().iter().all(|v| v.as_str().is_some()));

        let typed = inferring.from_json(&json).unwrap();
        let items = typed.as_list().unwrap();
        assert!(items[0].as_datetime().is_some());
        assert_eq!(items[1], TnetValue::Guid(Uuid::nil()));
        assert_eq!(items[2], TnetValue::from("hi"));
    }
}
