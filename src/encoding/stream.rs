// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Iteration over back-to-back units in one buffer.

use std::iter::FusedIterator;

use tracing::debug;

use super::decoder::{Decoded, TnetDecoder};
use crate::core::Result;

/// Iterator over consecutive units, starting at an offset.
///
/// Yields each unit in order and stops at the end of the input. After the
/// first error the stream yields that error once and then ends. A start
/// offset past the end of the input is such an error.
///
/// # Example
///
/// ```
/// use tnetcodec::encoding::decoder::TnetDecoder;
/// use tnetcodec::encoding::stream::UnitStream;
///
/// let decoder = TnetDecoder::new();
/// let offsets: Vec<usize> = UnitStream::new(&decoder, b"0:~1:7#", 0)
///     .map(|unit| unit.unwrap().offset)
///     .collect();
/// assert_eq!(offsets, vec![0, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct UnitStream<'a> {
    decoder: &'a TnetDecoder,
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> UnitStream<'a> {
    /// Create a stream over `data` starting at `offset`.
    pub fn new(decoder: &'a TnetDecoder, data: &'a [u8], offset: usize) -> Self {
        Self {
            decoder,
            data,
            offset,
            done: false,
        }
    }

    /// Offset of the next unit to decode.
    pub fn position(&self) -> usize {
        self.offset
    }
}

impl Iterator for UnitStream<'_> {
    type Item = Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset == self.data.len() {
            return None;
        }
        match self.decoder.decode(self.data, self.offset) {
            Ok(decoded) => {
                self.offset = decoded.end();
                Some(Ok(decoded))
            }
            Err(err) => {
                debug!(offset = self.offset, error = %err, "unit stream stopped");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for UnitStream<'_> {}
