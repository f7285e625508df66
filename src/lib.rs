// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # tnetcodec
//!
//! Codec for TNet, a length-prefixed, self-describing tagged-string format.
//!
//! Every value travels as one unit `N:BT`: the decimal byte length `N` of the
//! body, a colon, the body `B`, and a one-byte type tag `T`. Lists and
//! mappings nest by concatenating child units in their body.
//!
//! ## Architecture
//!
//! - `core/` - Value model ([`TnetValue`]), tag alphabet ([`Tag`]) and errors
//! - `config` - Limits and validation switches ([`CodecConfig`])
//! - `encoding/` - Cursor, decoder, size calculator, encoder, unit stream,
//!   JSON bridge
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tnetcodec::TnetValue;
//!
//! let value = TnetValue::dict([("id", TnetValue::Int(7)), ("tags", TnetValue::list(["a"]))]);
//! let wire = tnetcodec::encode(&value)?;
//! assert_eq!(wire, b"23:2:id,1:7#4:tags,4:1:a,]}");
//!
//! let decoded = tnetcodec::decode(&wire)?;
//! assert_eq!(decoded.value, value);
//! assert_eq!(decoded.consumed, wire.len());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, Result, Tag, TnetMap, TnetValue};

// Configuration
pub mod config;

pub use config::{CodecConfig, ConfigError, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    Decoded, JsonBridge, SizePlan, TnetCalculator, TnetCursor, TnetDecoder, TnetEncoder, UnitStream,
};

/// Decode the unit at the start of `data` with the default configuration.
pub fn decode(data: &[u8]) -> Result<Decoded> {
    decode_at(data, 0)
}

/// Decode the unit starting at `offset` with the default configuration.
pub fn decode_at(data: &[u8], offset: usize) -> Result<Decoded> {
    TnetDecoder::new().decode(data, offset)
}

/// Decode every back-to-back unit in `data`.
pub fn decode_all(data: &[u8]) -> Result<Vec<TnetValue>> {
    let decoder = TnetDecoder::new();
    UnitStream::new(&decoder, data, 0)
        .map(|unit| unit.map(|decoded| decoded.value))
        .collect()
}

/// Encode one value with the default configuration.
pub fn encode(value: &TnetValue) -> Result<Vec<u8>> {
    let mut encoder = TnetEncoder::new();
    encoder.value(value)?;
    Ok(encoder.finish())
}

/// Encode one value as text.
///
/// Fails when a binary payload makes the output invalid UTF-8.
pub fn encode_to_string(value: &TnetValue) -> Result<String> {
    String::from_utf8(encode(value)?).map_err(|e| {
        CodecError::unsupported_value(
            "binary",
            format!(
                "encoding is not valid UTF-8 after {} bytes",
                e.utf8_error().valid_up_to()
            ),
        )
    })
}
