// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TNet size calculator.
//!
//! Computes the exact size of a value's encoding without producing it. The
//! encoder uses it to write a container's length prefix before the body.

use chrono::Datelike;

use crate::config::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
use crate::core::{CodecError, Result, TnetValue};

/// Byte length of a date-time body.
const DATETIME_BODY_LEN: usize = 23;

/// Byte length of a hyphenated GUID body.
const GUID_BODY_LEN: usize = 36;

/// TNet size calculator.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use tnetcodec::encoding::calculator::TnetCalculator;
/// use tnetcodec::TnetValue;
///
/// let calc = TnetCalculator::new();
/// let value = TnetValue::list([1, 2]);
/// assert_eq!(calc.body_len(&value)?, 8);   // 1:1#1:2#
/// assert_eq!(calc.unit_len(&value)?, 11);  // 8:1:1#1:2#]
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TnetCalculator {
    /// Maximum container nesting accepted
    max_depth: usize,
}

impl Default for TnetCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TnetCalculator {
    /// Create a calculator with the default nesting limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a calculator with the given nesting limit.
    ///
    /// Limits above [`MAX_SUPPORTED_DEPTH`] are lowered to it.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_SUPPORTED_DEPTH),
        }
    }

    /// Size of the body `B` of the value's `N:BT` unit.
    ///
    /// Fails when the value cannot be encoded at all.
    pub fn body_len(&self, value: &TnetValue) -> Result<usize> {
        self.measure(value, 0, &mut Vec::new(), false)
    }

    /// Body lengths of the value and every unit nested in it, in pre-order.
    ///
    /// Dict keys are not recorded; their length is the key's byte length.
    pub fn plan(&self, value: &TnetValue) -> Result<SizePlan> {
        let mut body_lens = Vec::new();
        self.measure(value, 0, &mut body_lens, true)?;
        Ok(SizePlan { body_lens })
    }

    /// Size of the whole `N:BT` unit.
    pub fn unit_len(&self, value: &TnetValue) -> Result<usize> {
        self.body_len(value).map(unit_len_for_body)
    }

    fn measure(
        &self,
        value: &TnetValue,
        depth: usize,
        body_lens: &mut Vec<usize>,
        record: bool,
    ) -> Result<usize> {
        let slot = body_lens.len();
        if record {
            body_lens.push(0);
        }
        let len = match value {
            TnetValue::Null => 0,
            TnetValue::Str(s) => s.len(),
            TnetValue::Int(v) => int_len(*v),
            TnetValue::Float(v) if !v.is_finite() => {
                return Err(CodecError::unsupported_value(
                    value.type_name(),
                    format!("{v} has no decimal form"),
                ));
            }
            TnetValue::Float(v) => v.to_string().len(),
            TnetValue::Bool(true) => 4,
            TnetValue::Bool(false) => 5,
            TnetValue::DateTime(dt) => {
                if !(0..=9999).contains(&dt.year()) {
                    return Err(CodecError::unsupported_value(
                        value.type_name(),
                        format!("year {} does not fit in four digits", dt.year()),
                    ));
                }
                DATETIME_BODY_LEN
            }
            TnetValue::Guid(_) => GUID_BODY_LEN,
            TnetValue::Bytes(b) => b.len(),
            TnetValue::List(items) => {
                let depth = self.enter(value, depth)?;
                let mut total = 0;
                for item in items {
                    total += unit_len_for_body(self.measure(item, depth, body_lens, record)?);
                }
                total
            }
            TnetValue::Dict(map) => {
                let depth = self.enter(value, depth)?;
                let mut total = 0;
                for (key, item) in map {
                    total += unit_len_for_body(key.len());
                    total += unit_len_for_body(self.measure(item, depth, body_lens, record)?);
                }
                total
            }
        };
        if record {
            body_lens[slot] = len;
        }
        Ok(len)
    }

    /// Depth of a container's children, or an error past the limit.
    fn enter(&self, value: &TnetValue, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(CodecError::unsupported_value(
                value.type_name(),
                format!("nesting exceeds the maximum depth of {}", self.max_depth),
            ));
        }
        Ok(depth)
    }
}

/// Precomputed body lengths for one value, in pre-order.
///
/// Produced by [`TnetCalculator::plan`] and consumed by the encoder, so a
/// value is sized once however deeply it nests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizePlan {
    body_lens: Vec<usize>,
}

impl SizePlan {
    /// Body length of the outermost unit.
    pub fn body_len(&self) -> usize {
        self.body_lens.first().copied().unwrap_or_default()
    }

    /// Size of the whole outermost unit.
    pub fn unit_len(&self) -> usize {
        unit_len_for_body(self.body_len())
    }

    /// All recorded body lengths.
    pub fn body_lens(&self) -> &[usize] {
        &self.body_lens
    }
}

/// Number of decimal digits in `n`.
pub fn digit_count(n: u64) -> usize {
    let mut count = 1;
    let mut rest = n / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}

/// Size of an `N:BT` unit whose body is `body_len` bytes.
pub fn unit_len_for_body(body_len: usize) -> usize {
    digit_count(body_len as u64) + 1 + body_len + 1
}

fn int_len(v: i64) -> usize {
    // unsigned_abs covers i64::MIN
    usize::from(v < 0) + digit_count(v.unsigned_abs())
}
