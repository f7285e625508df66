// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show the unit tree with offsets and sizes.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::common::{preview_bytes, read_input, Result};
use tnetcodec::{CodecConfig, CodecError, Tag, TnetCursor, TnetDecoder, UnitStream};

/// Longest scalar body preview, in bytes.
const PREVIEW_LEN: usize = 32;

/// Show the structure of TNet data.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Wire input file (stdin when omitted or '-')
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

impl InspectCmd {
    pub fn run(self, config: &CodecConfig) -> Result<()> {
        let data = read_input(self.input.as_deref())?;
        let decoder = TnetDecoder::with_config(config.clone());

        let mut stdout = std::io::stdout().lock();
        let mut units = 0usize;
        for unit in UnitStream::new(&decoder, &data, 0) {
            print_unit(&mut stdout, &data, unit?.offset, 0)?;
            units += 1;
        }
        writeln!(stdout, "{units} units, {} bytes", data.len())?;
        Ok(())
    }
}

/// Print the unit at `offset`, then its children one level deeper.
///
/// Only headers are read; the unit must already have decoded cleanly.
/// Returns the offset just past the unit.
fn print_unit(out: &mut impl Write, data: &[u8], offset: usize, depth: usize) -> Result<usize> {
    let mut cursor = TnetCursor::at(data, offset)?;
    let body_len = cursor.read_length()?;
    let body_start = cursor.position();
    let body = cursor.read_exact(body_len)?;
    let byte = cursor.read_byte()?;
    let tag = Tag::from_byte(byte).ok_or(CodecError::UnknownTag { offset, tag: byte })?;
    let end = cursor.position();

    let indent = "  ".repeat(depth);
    write!(
        out,
        "{indent}@{offset} {tag} body={body_len} size={}",
        end - offset
    )?;

    if !tag.is_container() {
        if !body.is_empty() {
            write!(out, " {}", preview_bytes(body, PREVIEW_LEN))?;
        }
        writeln!(out)?;
        return Ok(end);
    }
    writeln!(out)?;

    let scope = &data[..body_start + body_len];
    let mut child = body_start;
    while child < scope.len() {
        child = print_unit(out, scope, child, depth + 1)?;
    }
    Ok(end)
}
