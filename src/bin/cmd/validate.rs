// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Validate command - check that every unit decodes.

use std::path::PathBuf;

use clap::Args;

use crate::common::{read_input, Result};
use tnetcodec::{CodecConfig, TnetDecoder, UnitStream};

/// Check TNet data for errors.
#[derive(Args, Clone, Debug)]
pub struct ValidateCmd {
    /// Wire input file (stdin when omitted or '-')
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

impl ValidateCmd {
    pub fn run(self, config: &CodecConfig) -> Result<()> {
        let data = read_input(self.input.as_deref())?;
        let decoder = TnetDecoder::with_config(config.clone());

        let mut units = 0usize;
        for unit in UnitStream::new(&decoder, &data, 0) {
            match unit {
                Ok(_) => units += 1,
                Err(err) => {
                    println!("invalid: unit {} failed to decode", units + 1);
                    for (name, value) in err.log_fields() {
                        println!("  {name}: {value}");
                    }
                    return Err(err.into());
                }
            }
        }

        println!("ok: {units} units, {} bytes", data.len());
        Ok(())
    }
}
