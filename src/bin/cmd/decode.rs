// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - every unit in the input to JSON.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;

use crate::common::{read_input, Result};
use tnetcodec::{CodecConfig, JsonBridge, TnetDecoder, UnitStream};

/// Decode TNet units to JSON.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Wire input file (stdin when omitted or '-')
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Pretty-print each JSON document
    #[arg(long)]
    pretty: bool,
}

impl DecodeCmd {
    pub fn run(self, config: &CodecConfig) -> Result<()> {
        let data = read_input(self.input.as_deref())?;
        let decoder = TnetDecoder::with_config(config.clone());
        let bridge = JsonBridge::new();

        let mut stdout = std::io::stdout().lock();
        for unit in UnitStream::new(&decoder, &data, 0) {
            let unit = unit?;
            let text = bridge.to_json_string(&unit.value, self.pretty)?;
            writeln!(stdout, "{text}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
