// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bounded cursor for reading TNet units.
//!
//! The cursor tracks:
//! - `offset`: current read position in the buffer
//! - `limit`: the first byte it may not read (end of buffer at top level,
//!   end of the enclosing container body otherwise)
//! - `frames`: stack of entered containers
//!
//! Reads past `limit` fail with [`CodecError::BufferTooShort`] at top level
//! and with [`CodecError::ContainerOverrun`] inside a container, so a child
//! can never silently consume bytes that belong to its parent.

use crate::core::{CodecError, Result};

/// A container body the cursor is currently inside.
#[derive(Debug, Clone, Copy)]
struct ContainerFrame {
    /// Offset of the container unit's first length digit
    unit_offset: usize,
    /// Offset of the first body byte
    body_start: usize,
    /// Declared body length
    declared: usize,
    /// Limit in force before entering
    saved_limit: usize,
    /// Position just past the container's tag byte
    resume_at: usize,
}

/// Cursor over a buffer of back-to-back TNet units.
///
/// # Example
///
/// ```
/// use tnetcodec::encoding::cursor::TnetCursor;
///
/// let mut cursor = TnetCursor::new(b"5:hello,");
/// assert_eq!(cursor.read_length().unwrap(), 5);
/// assert_eq!(cursor.read_exact(5).unwrap(), b"hello");
/// assert_eq!(cursor.read_byte().unwrap(), b',');
/// assert!(cursor.is_at_limit());
/// ```
#[derive(Debug)]
pub struct TnetCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Exclusive read bound
    limit: usize,
    /// Entered containers, innermost last
    frames: Vec<ContainerFrame>,
}

impl<'a> TnetCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            limit: data.len(),
            frames: Vec::new(),
        }
    }

    /// Create a cursor positioned at `offset`.
    ///
    /// `offset == data.len()` is allowed (nothing left to read); anything
    /// beyond the buffer is an error.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        if offset > data.len() {
            return Err(CodecError::buffer_too_short(offset, data.len(), 0));
        }
        let mut cursor = Self::new(data);
        cursor.offset = offset;
        Ok(cursor)
    }

    /// Get the current position relative to the buffer start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the bytes left before the current limit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.offset)
    }

    /// Check if the cursor reached the current limit.
    #[inline]
    pub fn is_at_limit(&self) -> bool {
        self.offset >= self.limit
    }

    /// Number of containers currently entered.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Build the error for a read of `requested` bytes that crosses the limit.
    fn shortfall(&self, requested: usize) -> CodecError {
        match self.frames.last() {
            Some(frame) => CodecError::container_overrun(
                frame.unit_offset,
                frame.declared,
                self.offset.saturating_add(requested) - frame.body_start,
            ),
            None => CodecError::buffer_too_short(requested, self.remaining(), self.offset),
        }
    }

    /// Read exactly `n` bytes and advance.
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.shortfall(n));
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    /// Read a single byte and advance.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.is_at_limit() {
            return Err(self.shortfall(1));
        }
        let byte = self.data[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    /// Read a decimal length field and its terminating `:`.
    ///
    /// The field must be a non-empty run of ASCII digits. Leading zeros are
    /// accepted; a value that does not fit in `usize` is rejected.
    pub fn read_length(&mut self) -> Result<usize> {
        let start = self.offset;
        let mut length: usize = 0;

        loop {
            let byte = self.read_byte()?;
            match byte {
                b'0'..=b'9' => {
                    length = length
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(usize::from(byte - b'0')))
                        .ok_or_else(|| {
                            CodecError::malformed_length(start, "length does not fit in usize")
                        })?;
                }
                b':' if self.offset - 1 > start => return Ok(length),
                b':' => return Err(CodecError::malformed_length(start, "length field is empty")),
                other => {
                    let found = if other.is_ascii_graphic() {
                        format!("'{}'", other as char)
                    } else {
                        format!("0x{other:02x}")
                    };
                    return Err(CodecError::malformed_length(
                        start,
                        format!("expected digit or ':', found {found}"),
                    ));
                }
            }
        }
    }

    /// Enter a container whose unit has just been read in full.
    ///
    /// The cursor rewinds to `body_start` and limits reads to the declared
    /// body. Must be called right after the container's tag byte.
    pub fn enter_container(&mut self, unit_offset: usize, body_start: usize, declared: usize) {
        debug_assert_eq!(self.offset, body_start + declared + 1);
        self.frames.push(ContainerFrame {
            unit_offset,
            body_start,
            declared,
            saved_limit: self.limit,
            resume_at: self.offset,
        });
        self.limit = body_start + declared;
        self.offset = body_start;
    }

    /// Leave the innermost container and continue after its tag byte.
    ///
    /// Fails if the container body was not consumed exactly.
    pub fn leave_container(&mut self) -> Result<()> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| CodecError::malformed_length(self.offset, "no container to leave"))?;
        if self.offset != self.limit {
            return Err(CodecError::container_overrun(
                frame.unit_offset,
                frame.declared,
                self.offset - frame.body_start,
            ));
        }
        self.limit = frame.saved_limit;
        self.offset = frame.resume_at;
        Ok(())
    }
}
