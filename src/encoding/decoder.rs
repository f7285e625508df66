// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TNet decoder implementation.
//!
//! Decodes one `N:BT` unit starting at an offset in a buffer and reports how
//! many bytes the unit occupied, so callers can walk back-to-back units with
//! `offset += consumed`.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tnetcodec::encoding::decoder::TnetDecoder;
//! use tnetcodec::TnetValue;
//!
//! let decoder = TnetDecoder::new();
//! let decoded = decoder.decode(b"8:1:1#1:2#]", 0)?;
//! assert_eq!(decoded.value, TnetValue::list([1, 2]));
//! assert_eq!(decoded.consumed, 11);
//! # Ok(())
//! # }
//! ```

use std::ops::Range;

use chrono::NaiveDateTime;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::config::{CodecConfig, MAX_SUPPORTED_DEPTH};
use crate::core::value::DATETIME_FORMAT;
use crate::core::{CodecError, Result, Tag, TnetMap, TnetValue};

use super::cursor::TnetCursor;

/// Byte length of a date-time body.
const DATETIME_BODY_LEN: usize = 23;

/// Byte length of a hyphenated GUID body.
const GUID_BODY_LEN: usize = 36;

/// One decoded unit and where it sat in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The decoded value
    pub value: TnetValue,
    /// Tag byte of the unit
    pub tag: Tag,
    /// Offset of the unit's first length digit
    pub offset: usize,
    /// Declared body length
    pub body_len: usize,
    /// Total bytes the unit occupies: digits, `:`, body and tag
    pub consumed: usize,
}

impl Decoded {
    /// Offset of the first byte after this unit.
    pub fn end(&self) -> usize {
        self.offset + self.consumed
    }

    /// Byte range of the unit's body within the input.
    pub fn body_range(&self) -> Range<usize> {
        let body_end = self.end() - 1;
        body_end - self.body_len..body_end
    }
}

/// TNet decoder.
///
/// Holds only an immutable [`CodecConfig`]; a decoder can be shared between
/// threads and reused for any number of buffers.
#[derive(Debug, Clone, Default)]
pub struct TnetDecoder {
    config: CodecConfig,
}

impl TnetDecoder {
    /// Create a decoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode the unit that starts at `offset`.
    ///
    /// # Arguments
    ///
    /// * `data` - Buffer holding one or more units
    /// * `offset` - Position of the unit's first length digit
    pub fn decode(&self, data: &[u8], offset: usize) -> Result<Decoded> {
        let mut cursor = TnetCursor::at(data, offset)?;
        let (value, tag, body_len) = self.decode_unit(&mut cursor)?;
        Ok(Decoded {
            value,
            tag,
            offset,
            body_len,
            consumed: cursor.position() - offset,
        })
    }

    /// Decode the unit at the start of `data` and return only its value.
    ///
    /// Bytes after the first unit are ignored.
    pub fn decode_value(&self, data: &[u8]) -> Result<TnetValue> {
        self.decode(data, 0).map(|decoded| decoded.value)
    }

    /// Decode one unit at the cursor position.
    fn decode_unit(&self, cursor: &mut TnetCursor<'_>) -> Result<(TnetValue, Tag, usize)> {
        let start = cursor.position();
        let body_len = cursor.read_length()?;

        if body_len == 0 {
            let byte = cursor.read_byte()?;
            let tag = Tag::from_byte(byte)
                .filter(|tag| tag.allows_empty_body())
                .ok_or_else(|| CodecError::malformed_zero_length(start, byte))?;
            if tag.is_container() {
                self.check_depth(cursor, start)?;
            }
            return Ok((empty_value(tag), tag, 0));
        }

        let body_start = cursor.position();
        let body = cursor.read_exact(body_len)?;
        let byte = cursor.read_byte()?;
        let tag = Tag::from_byte(byte).ok_or(CodecError::UnknownTag {
            offset: start,
            tag: byte,
        })?;

        let value = match tag {
            Tag::String => TnetValue::Str(parse_str(start, body)?),
            Tag::Integer => TnetValue::Int(parse_int(start, body)?),
            Tag::Float => TnetValue::Float(parse_float(start, body)?),
            Tag::Boolean => TnetValue::Bool(self.parse_bool(start, body)?),
            Tag::DateTime => TnetValue::DateTime(parse_datetime(start, body)?),
            Tag::Guid => TnetValue::Guid(parse_guid(start, body)?),
            Tag::Binary => TnetValue::Bytes(body.to_vec()),
            Tag::Null => {
                return Err(CodecError::MalformedNull {
                    offset: start,
                    length: body_len,
                })
            }
            Tag::List | Tag::Dict => {
                self.check_depth(cursor, start)?;
                cursor.enter_container(start, body_start, body_len);
                trace!(
                    offset = start,
                    tag = %tag,
                    body_len,
                    depth = cursor.depth(),
                    "entering container"
                );
                let value = if tag == Tag::List {
                    TnetValue::List(self.decode_list_body(cursor)?)
                } else {
                    TnetValue::Dict(self.decode_dict_body(cursor, start)?)
                };
                cursor.leave_container()?;
                value
            }
        };

        Ok((value, tag, body_len))
    }

    /// Decode list elements until the container body is exhausted.
    fn decode_list_body(&self, cursor: &mut TnetCursor<'_>) -> Result<Vec<TnetValue>> {
        let mut items = Vec::new();
        while !cursor.is_at_limit() {
            let (item, _, _) = self.decode_unit(cursor)?;
            items.push(item);
        }
        Ok(items)
    }

    /// Decode key/value pairs until the container body is exhausted.
    fn decode_dict_body(&self, cursor: &mut TnetCursor<'_>, start: usize) -> Result<TnetMap> {
        let mut map = TnetMap::new();
        while !cursor.is_at_limit() {
            let key_offset = cursor.position();
            let key = match self.decode_unit(cursor)?.0 {
                TnetValue::Str(key) => key,
                other => {
                    return Err(CodecError::KeyType {
                        offset: key_offset,
                        found: other.type_name(),
                    })
                }
            };
            if map.contains_key(&key) {
                return Err(CodecError::DuplicateKey {
                    offset: key_offset,
                    key,
                });
            }
            if cursor.is_at_limit() {
                return Err(CodecError::OddPairCount {
                    offset: start,
                    entries: map.len(),
                });
            }
            let (value, _, _) = self.decode_unit(cursor)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Reject a container that would nest deeper than the configured limit.
    ///
    /// The limit never exceeds [`MAX_SUPPORTED_DEPTH`], even for a config
    /// that skipped validation.
    fn check_depth(&self, cursor: &TnetCursor<'_>, start: usize) -> Result<()> {
        let limit = self.config.max_depth.min(MAX_SUPPORTED_DEPTH);
        if cursor.depth() >= limit {
            return Err(CodecError::DepthLimitExceeded {
                offset: start,
                limit,
            });
        }
        Ok(())
    }

    fn parse_bool(&self, offset: usize, body: &[u8]) -> Result<bool> {
        match body {
            b"true" => Ok(true),
            b"false" => Ok(false),
            _ if self.config.strict_booleans => Err(CodecError::boolean_format(offset, body)),
            _ => {
                warn!(
                    offset,
                    body = %String::from_utf8_lossy(body),
                    "non-canonical boolean body decoded as false"
                );
                Ok(false)
            }
        }
    }
}

/// Value of a legal `0:<tag>` unit.
fn empty_value(tag: Tag) -> TnetValue {
    match tag {
        Tag::String => TnetValue::Str(String::new()),
        Tag::Binary => TnetValue::Bytes(Vec::new()),
        Tag::List => TnetValue::List(Vec::new()),
        Tag::Dict => TnetValue::Dict(TnetMap::new()),
        _ => TnetValue::Null,
    }
}

fn parse_str(offset: usize, body: &[u8]) -> Result<String> {
    std::str::from_utf8(body)
        .map(str::to_owned)
        .map_err(|e| CodecError::InvalidUtf8 {
            offset,
            valid_up_to: e.valid_up_to(),
        })
}

/// `-?[0-9]+`
fn parse_int(offset: usize, body: &[u8]) -> Result<i64> {
    let digits = body.strip_prefix(b"-").unwrap_or(body);
    if !is_digits(digits) {
        return Err(CodecError::numeric_format(offset, Tag::Integer, body));
    }
    parse_ascii(body).ok_or_else(|| CodecError::numeric_format(offset, Tag::Integer, body))
}

/// `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`, finite only.
fn parse_float(offset: usize, body: &[u8]) -> Result<f64> {
    let err = || CodecError::numeric_format(offset, Tag::Float, body);

    let unsigned = body.strip_prefix(b"-").unwrap_or(body);
    let (mantissa, exponent) = match unsigned.iter().position(|&b| b == b'e' || b == b'E') {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };
    let (whole, fraction) = match mantissa.iter().position(|&b| b == b'.') {
        Some(pos) => (&mantissa[..pos], Some(&mantissa[pos + 1..])),
        None => (mantissa, None),
    };
    let exponent_ok = exponent.map_or(true, |exp| {
        let exp = exp
            .strip_prefix(b"+")
            .or_else(|| exp.strip_prefix(b"-"))
            .unwrap_or(exp);
        is_digits(exp)
    });
    if !is_digits(whole) || !fraction.map_or(true, is_digits) || !exponent_ok {
        return Err(err());
    }

    parse_ascii::<f64>(body)
        .filter(|v| v.is_finite())
        .ok_or_else(err)
}

fn is_digits(text: &[u8]) -> bool {
    !text.is_empty() && text.iter().all(u8::is_ascii_digit)
}

fn parse_ascii<T: std::str::FromStr>(body: &[u8]) -> Option<T> {
    std::str::from_utf8(body).ok()?.parse().ok()
}

/// Parse `yyyy-MM-ddTHH:mm:ss.fff`.
///
/// The shape is checked byte by byte first; chrono then validates the
/// calendar fields.
pub(crate) fn parse_datetime(offset: usize, body: &[u8]) -> Result<NaiveDateTime> {
    let shape_ok = body.len() == DATETIME_BODY_LEN
        && body.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 => b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(CodecError::date_format(offset, body));
    }
    std::str::from_utf8(body)
        .ok()
        .and_then(|text| NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).ok())
        .ok_or_else(|| CodecError::date_format(offset, body))
}

pub(crate) fn parse_guid(offset: usize, body: &[u8]) -> Result<Uuid> {
    if body.len() != GUID_BODY_LEN {
        return Err(CodecError::guid_format(offset, body));
    }
    Uuid::try_parse_ascii(body).map_err(|_| CodecError::guid_format(offset, body))
}
