// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for tnetcodec.
//!
//! Provides error types for codec operations:
//! - Length field and framing errors
//! - Scalar body parsing errors
//! - Container structure errors
//! - Encoding errors
//!
//! Decode errors carry the absolute byte offset of the unit at fault.

use std::fmt;

use super::Tag;

/// Maximum number of body bytes quoted in an error message.
const BODY_PREVIEW_LEN: usize = 48;

/// Errors that can occur while decoding or encoding TNet units.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Length prefix is not a run of ASCII digits terminated by `:`
    MalformedLength {
        /// Offset of the unit
        offset: usize,
        /// What was wrong with the length field
        reason: String,
    },

    /// `0:` followed by a tag that requires a body
    MalformedZeroLength {
        /// Offset of the unit
        offset: usize,
        /// Tag byte found after `0:`
        tag: u8,
    },

    /// Integer or float body is not a valid number
    NumericFormat {
        /// Offset of the unit
        offset: usize,
        /// Integer or float
        tag: Tag,
        /// Body preview
        body: String,
    },

    /// Boolean body is neither `true` nor `false` (strict mode)
    BooleanFormat {
        /// Offset of the unit
        offset: usize,
        /// Body preview
        body: String,
    },

    /// Date-time body does not match `yyyy-MM-ddTHH:mm:ss.fff`
    DateFormat {
        /// Offset of the unit
        offset: usize,
        /// Body preview
        body: String,
    },

    /// GUID body is not canonical hyphenated hex
    GuidFormat {
        /// Offset of the unit
        offset: usize,
        /// Body preview
        body: String,
    },

    /// String body is not valid UTF-8
    InvalidUtf8 {
        /// Offset of the unit
        offset: usize,
        /// Number of valid bytes before the first invalid sequence
        valid_up_to: usize,
    },

    /// A child unit reaches past its container's declared length
    ContainerOverrun {
        /// Offset of the container unit
        offset: usize,
        /// Declared body length of the container
        declared: usize,
        /// Body length the child would require
        required: usize,
    },

    /// Mapping body ends after a key without its value
    OddPairCount {
        /// Offset of the mapping unit
        offset: usize,
        /// Number of complete entries decoded before the dangling key
        entries: usize,
    },

    /// Mapping key decoded as something other than a string
    KeyType {
        /// Offset of the key unit
        offset: usize,
        /// Type name of the decoded key
        found: &'static str,
    },

    /// The same key appears twice in one mapping
    DuplicateKey {
        /// Offset of the repeated key unit
        offset: usize,
        /// The repeated key
        key: String,
    },

    /// Null unit with a non-empty body
    MalformedNull {
        /// Offset of the unit
        offset: usize,
        /// Declared body length
        length: usize,
    },

    /// Tag byte outside the tag alphabet
    UnknownTag {
        /// Offset of the unit
        offset: usize,
        /// The unrecognized tag byte
        tag: u8,
    },

    /// Input ends before the unit is complete
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Position where the read was attempted
        offset: usize,
    },

    /// Container nesting exceeds the configured limit
    DepthLimitExceeded {
        /// Offset of the container that would exceed the limit
        offset: usize,
        /// Configured maximum depth
        limit: usize,
    },

    /// Value cannot be represented on the wire
    UnsupportedValue {
        /// Type name of the offending value
        type_name: &'static str,
        /// Why it cannot be encoded
        reason: String,
    },
}

impl CodecError {
    /// Create a malformed length error.
    pub fn malformed_length(offset: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedLength {
            offset,
            reason: reason.into(),
        }
    }

    /// Create a malformed zero-length error.
    pub fn malformed_zero_length(offset: usize, tag: u8) -> Self {
        CodecError::MalformedZeroLength { offset, tag }
    }

    /// Create a numeric format error.
    pub fn numeric_format(offset: usize, tag: Tag, body: &[u8]) -> Self {
        CodecError::NumericFormat {
            offset,
            tag,
            body: preview(body),
        }
    }

    /// Create a boolean format error.
    pub fn boolean_format(offset: usize, body: &[u8]) -> Self {
        CodecError::BooleanFormat {
            offset,
            body: preview(body),
        }
    }

    /// Create a date format error.
    pub fn date_format(offset: usize, body: &[u8]) -> Self {
        CodecError::DateFormat {
            offset,
            body: preview(body),
        }
    }

    /// Create a GUID format error.
    pub fn guid_format(offset: usize, body: &[u8]) -> Self {
        CodecError::GuidFormat {
            offset,
            body: preview(body),
        }
    }

    /// Create a container overrun error.
    pub fn container_overrun(offset: usize, declared: usize, required: usize) -> Self {
        CodecError::ContainerOverrun {
            offset,
            declared,
            required,
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, offset: usize) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            offset,
        }
    }

    /// Create an unsupported value error.
    pub fn unsupported_value(type_name: &'static str, reason: impl Into<String>) -> Self {
        CodecError::UnsupportedValue {
            type_name,
            reason: reason.into(),
        }
    }

    /// Check if the error only means the input was cut short.
    ///
    /// A caller assembling frames from a byte source can read more data and
    /// retry; every other decode error is a defect in the wire text.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CodecError::BufferTooShort { .. })
    }

    /// Get the byte offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CodecError::MalformedLength { offset, .. }
            | CodecError::MalformedZeroLength { offset, .. }
            | CodecError::NumericFormat { offset, .. }
            | CodecError::BooleanFormat { offset, .. }
            | CodecError::DateFormat { offset, .. }
            | CodecError::GuidFormat { offset, .. }
            | CodecError::InvalidUtf8 { offset, .. }
            | CodecError::ContainerOverrun { offset, .. }
            | CodecError::OddPairCount { offset, .. }
            | CodecError::KeyType { offset, .. }
            | CodecError::DuplicateKey { offset, .. }
            | CodecError::MalformedNull { offset, .. }
            | CodecError::UnknownTag { offset, .. }
            | CodecError::BufferTooShort { offset, .. }
            | CodecError::DepthLimitExceeded { offset, .. } => Some(*offset),
            CodecError::UnsupportedValue { .. } => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::MalformedLength { offset, reason } => {
                vec![("offset", offset.to_string()), ("reason", reason.clone())]
            }
            CodecError::MalformedZeroLength { offset, tag } => {
                vec![("offset", offset.to_string()), ("tag", tag_repr(*tag))]
            }
            CodecError::NumericFormat { offset, tag, body } => vec![
                ("offset", offset.to_string()),
                ("tag", tag.as_str().to_string()),
                ("body", body.clone()),
            ],
            CodecError::BooleanFormat { offset, body }
            | CodecError::DateFormat { offset, body }
            | CodecError::GuidFormat { offset, body } => {
                vec![("offset", offset.to_string()), ("body", body.clone())]
            }
            CodecError::InvalidUtf8 {
                offset,
                valid_up_to,
            } => vec![
                ("offset", offset.to_string()),
                ("valid_up_to", valid_up_to.to_string()),
            ],
            CodecError::ContainerOverrun {
                offset,
                declared,
                required,
            } => vec![
                ("offset", offset.to_string()),
                ("declared", declared.to_string()),
                ("required", required.to_string()),
            ],
            CodecError::OddPairCount { offset, entries } => vec![
                ("offset", offset.to_string()),
                ("entries", entries.to_string()),
            ],
            CodecError::KeyType { offset, found } => {
                vec![("offset", offset.to_string()), ("found", found.to_string())]
            }
            CodecError::DuplicateKey { offset, key } => {
                vec![("offset", offset.to_string()), ("key", key.clone())]
            }
            CodecError::MalformedNull { offset, length } => vec![
                ("offset", offset.to_string()),
                ("length", length.to_string()),
            ],
            CodecError::UnknownTag { offset, tag } => {
                vec![("offset", offset.to_string()), ("tag", tag_repr(*tag))]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                offset,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("offset", offset.to_string()),
            ],
            CodecError::DepthLimitExceeded { offset, limit } => {
                vec![("offset", offset.to_string()), ("limit", limit.to_string())]
            }
            CodecError::UnsupportedValue { type_name, reason } => vec![
                ("type", type_name.to_string()),
                ("reason", reason.clone()),
            ],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MalformedLength { offset, reason } => {
                write!(f, "Malformed length at offset {offset}: {reason}")
            }
            CodecError::MalformedZeroLength { offset, tag } => write!(
                f,
                "Zero-length unit at offset {offset} has tag {} which requires a body",
                tag_repr(*tag)
            ),
            CodecError::NumericFormat { offset, tag, body } => write!(
                f,
                "Invalid {} body at offset {offset}: '{body}'",
                tag.as_str()
            ),
            CodecError::BooleanFormat { offset, body } => write!(
                f,
                "Invalid boolean body at offset {offset}: expected 'true' or 'false', found '{body}'"
            ),
            CodecError::DateFormat { offset, body } => write!(
                f,
                "Invalid datetime body at offset {offset}: expected yyyy-MM-ddTHH:mm:ss.fff, found '{body}'"
            ),
            CodecError::GuidFormat { offset, body } => write!(
                f,
                "Invalid guid body at offset {offset}: expected hyphenated hex, found '{body}'"
            ),
            CodecError::InvalidUtf8 {
                offset,
                valid_up_to,
            } => write!(
                f,
                "String body at offset {offset} is not valid UTF-8 after {valid_up_to} bytes"
            ),
            CodecError::ContainerOverrun {
                offset,
                declared,
                required,
            } => write!(
                f,
                "Container at offset {offset} declares {declared} body bytes, but its children require at least {required}"
            ),
            CodecError::OddPairCount { offset, entries } => write!(
                f,
                "Mapping at offset {offset} ends with a key but no value after {entries} entries"
            ),
            CodecError::KeyType { offset, found } => {
                write!(f, "Mapping key at offset {offset} must be a string, found {found}")
            }
            CodecError::DuplicateKey { offset, key } => {
                write!(f, "Duplicate mapping key '{key}' at offset {offset}")
            }
            CodecError::MalformedNull { offset, length } => write!(
                f,
                "Null unit at offset {offset} must have an empty body, found length {length}"
            ),
            CodecError::UnknownTag { offset, tag } => {
                write!(f, "Unknown tag {} for unit at offset {offset}", tag_repr(*tag))
            }
            CodecError::BufferTooShort {
                requested,
                available,
                offset,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {offset}, but only {available} bytes available"
            ),
            CodecError::DepthLimitExceeded { offset, limit } => write!(
                f,
                "Container at offset {offset} exceeds the maximum nesting depth of {limit}"
            ),
            CodecError::UnsupportedValue { type_name, reason } => {
                write!(f, "Cannot encode {type_name} value: {reason}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for tnetcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Lossy, length-capped rendering of a body for error messages.
fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= BODY_PREVIEW_LEN {
        text.into_owned()
    } else {
        let mut cut: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        cut.push_str("...");
        cut
    }
}

/// Render a tag byte as a quoted char, or hex when not printable.
fn tag_repr(tag: u8) -> String {
    if tag.is_ascii_graphic() {
        format!("'{}'", tag as char)
    } else {
        format!("0x{tag:02x}")
    }
}
