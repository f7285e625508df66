// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use tnetcodec::CodecConfig;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Override for `max_depth`
    pub max_depth: Option<usize>,
    /// Accept any boolean body, decoding unknown ones as false
    pub lenient_booleans: bool,
}

impl GlobalOptions {
    /// Build the codec configuration.
    ///
    /// Precedence, lowest first: defaults, config file, `TNETCODEC_*`
    /// environment variables, command-line flags.
    pub fn codec_config(&self) -> Result<CodecConfig> {
        let base = match &self.config {
            Some(path) => CodecConfig::from_toml_file(path)?,
            None => CodecConfig::default(),
        };
        let mut config = base.with_env_overrides()?;
        if let Some(max_depth) = self.max_depth {
            config = config.with_max_depth(max_depth);
        }
        if self.lenient_booleans {
            config = config.with_strict_booleans(false);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level from
/// `warn` through `info` and `debug` to `trace`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read the whole input: a file, or stdin when no path or `-` is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("Failed to read stdin")?;
            Ok(data)
        }
    }
}

/// Render bytes for a one-line preview: text when printable, hex otherwise.
pub fn preview_bytes(data: &[u8], max: usize) -> String {
    let shown = &data[..data.len().min(max)];
    let ellipsis = if data.len() > max { "..." } else { "" };
    match std::str::from_utf8(shown) {
        Ok(text) if !text.chars().any(char::is_control) => format!("{text:?}{ellipsis}"),
        _ => format!("0x{}{ellipsis}", hex::encode(shown)),
    }
}
