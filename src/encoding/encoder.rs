// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TNet encoder for writing wire units.
//!
//! Each value becomes one `N:BT` unit. Container lengths come from
//! [`TnetCalculator`], so the length prefix is written straight into the
//! output before the body.

use uuid::Uuid;

use super::calculator::TnetCalculator;
use crate::config::CodecConfig;
use crate::core::value::DATETIME_FORMAT;
use crate::core::{CodecError, Result, Tag, TnetValue};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 64;

/// TNet encoder.
///
/// Units written one after another form a valid back-to-back stream.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use tnetcodec::encoding::encoder::TnetEncoder;
/// use tnetcodec::TnetValue;
///
/// let mut encoder = TnetEncoder::new();
/// encoder.value(&TnetValue::Null)?.value(&TnetValue::from("hi"))?;
/// assert_eq!(encoder.finish(), b"0:~2:hi,");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TnetEncoder {
    /// Output buffer
    buffer: Vec<u8>,
    /// Sizes container bodies and enforces the nesting limit
    calculator: TnetCalculator,
}

impl Default for TnetEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TnetEncoder {
    /// Create an encoder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&CodecConfig::default())
    }

    /// Create an encoder that honours `config.max_depth`.
    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            buffer: Vec::with_capacity(DEFAULT_CAPACITY),
            calculator: TnetCalculator::with_max_depth(config.max_depth),
        }
    }

    /// Get the bytes written so far.
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Finish encoding and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Discard everything written so far.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Append one value as a unit.
    ///
    /// The whole value is sized once before anything is written; on error
    /// the buffer is left as it was.
    pub fn value(&mut self, value: &TnetValue) -> Result<&mut Self> {
        let plan = self.calculator.plan(value)?;
        self.buffer.reserve(plan.unit_len());

        let start = self.buffer.len();
        let mut body_lens = plan.body_lens().iter().copied();
        if let Err(err) = self.write_unit(value, &mut body_lens) {
            self.buffer.truncate(start);
            return Err(err);
        }
        Ok(self)
    }

    /// Write a unit, taking its body length and its children's from `body_lens`.
    fn write_unit<I>(&mut self, value: &TnetValue, body_lens: &mut I) -> Result<()>
    where
        I: Iterator<Item = usize>,
    {
        let body_len = body_lens.next().ok_or_else(|| {
            CodecError::unsupported_value(value.type_name(), "size plan ended early")
        })?;
        self.write_length(body_len);
        match value {
            TnetValue::Null => {}
            TnetValue::Str(s) => self.buffer.extend_from_slice(s.as_bytes()),
            TnetValue::Int(v) => self.buffer.extend_from_slice(v.to_string().as_bytes()),
            TnetValue::Float(v) => self.buffer.extend_from_slice(v.to_string().as_bytes()),
            TnetValue::Bool(v) => {
                let text: &[u8] = if *v { b"true" } else { b"false" };
                self.buffer.extend_from_slice(text);
            }
            TnetValue::DateTime(dt) => self
                .buffer
                .extend_from_slice(dt.format(DATETIME_FORMAT).to_string().as_bytes()),
            TnetValue::Guid(g) => {
                let mut buf = Uuid::encode_buffer();
                let text = g.hyphenated().encode_lower(&mut buf);
                self.buffer.extend_from_slice(text.as_bytes());
            }
            TnetValue::Bytes(b) => self.buffer.extend_from_slice(b),
            TnetValue::List(items) => {
                for item in items {
                    self.write_unit(item, body_lens)?;
                }
            }
            TnetValue::Dict(map) => {
                for (key, item) in map {
                    self.write_length(key.len());
                    self.buffer.extend_from_slice(key.as_bytes());
                    self.buffer.push(Tag::String.as_byte());
                    self.write_unit(item, body_lens)?;
                }
            }
        }
        self.buffer.push(value.tag().as_byte());
        Ok(())
    }

    fn write_length(&mut self, len: usize) {
        self.buffer.extend_from_slice(len.to_string().as_bytes());
        self.buffer.push(b':');
    }
}
