// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON document to one wire unit.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{read_input, Result};
use tnetcodec::{CodecConfig, JsonBridge, TnetEncoder};

/// Encode JSON as TNet.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// JSON input file (stdin when omitted or '-')
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Encode date-time and GUID shaped strings as typed units
    #[arg(long)]
    infer_types: bool,
}

impl EncodeCmd {
    pub fn run(self, config: &CodecConfig) -> Result<()> {
        let data = read_input(self.input.as_deref())?;
        let json: serde_json::Value =
            serde_json::from_slice(&data).context("Input is not valid JSON")?;

        let value = JsonBridge::new()
            .with_infer_types(self.infer_types)
            .from_json(&json)?;

        let mut encoder = TnetEncoder::with_config(config);
        encoder.value(&value)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&encoder.finish())?;
        stdout.flush()?;
        Ok(())
    }
}
