// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout tnetcodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy for decoding and encoding
//! - [`TnetValue`] - Unified value representation
//! - [`Tag`] - The closed alphabet of wire type tags

pub mod error;
pub mod value;

pub use error::{CodecError, Result};
pub use value::{TnetMap, TnetValue};

/// Wire type tag: the single byte that terminates every unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `,` UTF-8 string
    String,
    /// `#` base-10 signed integer
    Integer,
    /// `^` double-precision float
    Float,
    /// `!` boolean literal
    Boolean,
    /// `@` date-time, `yyyy-MM-ddTHH:mm:ss.fff`
    DateTime,
    /// `+` hyphenated GUID
    Guid,
    /// `*` raw bytes
    Binary,
    /// `]` ordered list
    List,
    /// `}` string-keyed mapping
    Dict,
    /// `~` null
    Null,
}

impl Tag {
    /// All tags, in wire-table order.
    pub const ALL: [Tag; 10] = [
        Tag::String,
        Tag::Integer,
        Tag::Float,
        Tag::Boolean,
        Tag::DateTime,
        Tag::Guid,
        Tag::Binary,
        Tag::List,
        Tag::Dict,
        Tag::Null,
    ];

    /// Get the wire byte for this tag.
    pub const fn as_byte(self) -> u8 {
        match self {
            Tag::String => b',',
            Tag::Integer => b'#',
            Tag::Float => b'^',
            Tag::Boolean => b'!',
            Tag::DateTime => b'@',
            Tag::Guid => b'+',
            Tag::Binary => b'*',
            Tag::List => b']',
            Tag::Dict => b'}',
            Tag::Null => b'~',
        }
    }

    /// Look up the tag for a wire byte.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b',' => Some(Tag::String),
            b'#' => Some(Tag::Integer),
            b'^' => Some(Tag::Float),
            b'!' => Some(Tag::Boolean),
            b'@' => Some(Tag::DateTime),
            b'+' => Some(Tag::Guid),
            b'*' => Some(Tag::Binary),
            b']' => Some(Tag::List),
            b'}' => Some(Tag::Dict),
            b'~' => Some(Tag::Null),
            _ => None,
        }
    }

    /// Get the wire byte as a `char`.
    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// Check if units with this tag carry nested units in their body.
    pub const fn is_container(self) -> bool {
        matches!(self, Tag::List | Tag::Dict)
    }

    /// Check if `0:<tag>` is a legal unit.
    ///
    /// Numbers, booleans, date-times and GUIDs always have a non-empty body.
    pub const fn allows_empty_body(self) -> bool {
        matches!(
            self,
            Tag::Null | Tag::String | Tag::Binary | Tag::List | Tag::Dict
        )
    }

    /// Convert to string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::String => "string",
            Tag::Integer => "integer",
            Tag::Float => "float",
            Tag::Boolean => "boolean",
            Tag::DateTime => "datetime",
            Tag::Guid => "guid",
            Tag::Binary => "binary",
            Tag::List => "list",
            Tag::Dict => "dict",
            Tag::Null => "null",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.as_str(), self.as_char())
    }
}

/// Error returned when parsing a `Tag` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTagError {
    _private: (),
}

impl std::fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid tag, expected a tag name (e.g. 'string') or one of , # ^ ! @ + * ] }} ~"
        )
    }
}

impl std::error::Error for ParseTagError {}

impl std::str::FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let [byte] = s.as_bytes() {
            if let Some(tag) = Tag::from_byte(*byte) {
                return Ok(tag);
            }
        }
        let lower = s.to_lowercase();
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == lower)
            .ok_or(ParseTagError { _private: () })
    }
}
