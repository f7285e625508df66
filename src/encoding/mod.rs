// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encoding and decoding.
//!
//! - [`cursor`] - Bounded byte cursor with a container-limit stack
//! - [`decoder`] - Unit decoder
//! - [`calculator`] - Exact encoded sizes
//! - [`encoder`] - Unit encoder
//! - [`stream`] - Iteration over back-to-back units
//! - [`json`] - Conversion to and from JSON

pub mod calculator;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod json;
pub mod stream;

pub use calculator::{SizePlan, TnetCalculator};
pub use cursor::TnetCursor;
pub use decoder::{Decoded, TnetDecoder};
pub use encoder::TnetEncoder;
pub use json::JsonBridge;
pub use stream::UnitStream;
