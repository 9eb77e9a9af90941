//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::script::{NumberFormat, DEFAULT_DECIMALS, MAX_DECIMALS};
use crate::tape::{DrawingLayer, LayerMap};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Script output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Drawing layer assignment.
    #[serde(default)]
    pub layers: LayerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.decimals > MAX_DECIMALS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "output.decimals must be at most {MAX_DECIMALS}, got {}",
                    self.output.decimals
                ),
            });
        }

        for (name, layer) in [
            ("layers.tape_body", Some(self.layers.tape_body)),
            ("layers.holes", Some(self.layers.holes)),
            ("layers.parts", self.layers.parts),
        ] {
            if layer == Some(0) {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be a layer number from 1 to 255"),
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Returns the number format for script output.
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.output.decimals)
    }

    /// Returns the layer assignment for the layout engine.
    #[must_use]
    pub fn layer_map(&self) -> LayerMap {
        LayerMap {
            tape_body: DrawingLayer(self.layers.tape_body),
            holes: DrawingLayer(self.layers.holes),
            parts: self.layers.parts.map(DrawingLayer),
        }
    }
}

/// Script output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Decimal places for coordinates (0-9). Trailing zeros are stripped.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

const fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

/// Drawing layer configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    /// Layer for the tape outline.
    #[serde(default = "default_tape_body_layer")]
    pub tape_body: u8,

    /// Layer for sprocket holes.
    #[serde(default = "default_holes_layer")]
    pub holes: u8,

    /// Layer for parts. Unset keeps the hole layer active.
    #[serde(default)]
    pub parts: Option<u8>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            tape_body: default_tape_body_layer(),
            holes: default_holes_layer(),
            parts: None,
        }
    }
}

const fn default_tape_body_layer() -> u8 {
    DrawingLayer::DOCUMENTATION.id()
}

const fn default_holes_layer() -> u8 {
    DrawingLayer::HOLES.id()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
