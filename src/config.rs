// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec configuration.
//!
//! [`CodecConfig`] holds the limits and validation switches shared by the
//! decoder and the encoder. It can be built in code, loaded from TOML, or
//! overridden from environment variables.
//!
//! ```toml
//! max_depth = 32
//! strict_booleans = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest `max_depth` a configuration may ask for.
///
/// Decoding and encoding recurse once per nesting level, so the limit must
/// stay well inside a default thread stack.
pub const MAX_SUPPORTED_DEPTH: usize = 256;

/// Environment variable overriding [`CodecConfig::max_depth`].
pub const ENV_MAX_DEPTH: &str = "TNETCODEC_MAX_DEPTH";

/// Environment variable overriding [`CodecConfig::strict_booleans`].
pub const ENV_STRICT_BOOLEANS: &str = "TNETCODEC_STRICT_BOOLEANS";

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

/// Limits and validation switches for decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum container nesting depth; a top-level list or dict is depth 1
    pub max_depth: usize,

    /// Reject boolean bodies other than `true` and `false`.
    ///
    /// When disabled, any body other than `true` decodes as `false`.
    pub strict_booleans: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_booleans: true,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable strict boolean parsing.
    pub fn with_strict_booleans(mut self, strict: bool) -> Self {
        self.strict_booleans = strict;
        self
    }

    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            max_depth = config.max_depth,
            strict_booleans = config.strict_booleans,
            "loaded codec config"
        );
        Ok(config)
    }

    /// Apply `TNETCODEC_*` environment overrides on top of this configuration.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            self.max_depth = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_MAX_DEPTH,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(ENV_STRICT_BOOLEANS) {
            let normalized = value.trim().to_lowercase();
            self.strict_booleans = match normalized.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: ENV_STRICT_BOOLEANS,
                        value,
                    })
                }
            };
        }

        self.validate()?;
        Ok(self)
    }

    /// Check the configuration for values the codec cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "max_depth {} exceeds the supported maximum of {MAX_SUPPORTED_DEPTH}",
                self.max_depth
            )));
        }
        Ok(())
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self)
            .unwrap_or_else(|_| String::from("# Failed to render codec config"))
    }
}
