//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::circuit::Layer;
use crate::error::ConfigError;

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

    /// Default pour settings.
    #[serde(default)]
    pub pour: PourDefaults,

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
        if Layer::parse(&self.pour.layer).is_none() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid pour layer '{}'. Must be one of: top, bottom, inner1-inner6",
                    self.pour.layer
                ),
            });
        }

        let margins = [
            ("pad_margin", Some(self.pour.pad_margin)),
            ("trace_margin", Some(self.pour.trace_margin)),
            ("board_edge_margin", Some(self.pour.board_edge_margin)),
            ("cutout_margin", self.pour.cutout_margin),
        ];
        for (name, value) in margins {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::ValidationError {
                        message: format!("Invalid {name} {value}. Must be a non-negative number"),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Default pour settings, used where the command line does not override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PourDefaults {
    /// Layer to pour on: "top", "bottom", "inner1".."inner6".
    /// Default: "top"
    #[serde(default = "default_layer")]
    pub layer: String,

    /// Clearance around pads of other nets in mm.
    #[serde(default = "default_margin")]
    pub pad_margin: f64,

    /// Clearance around traces of other nets in mm.
    #[serde(default = "default_margin")]
    pub trace_margin: f64,

    /// Clearance from the board edge in mm.
    #[serde(default)]
    pub board_edge_margin: f64,

    /// Clearance around cutouts in mm. Unset leaves it to the solver.
    #[serde(default)]
    pub cutout_margin: Option<f64>,
}

impl PourDefaults {
    /// Returns the configured layer.
    ///
    /// Falls back to the top layer if the name is unknown; [`Config::validate`]
    /// rejects such configurations.
    #[must_use]
    pub fn layer(&self) -> Layer {
        Layer::parse(&self.layer).unwrap_or_default()
    }
}

impl Default for PourDefaults {
    fn default() -> Self {
        Self {
            layer: default_layer(),
            pad_margin: default_margin(),
            trace_margin: default_margin(),
            board_edge_margin: 0.0,
            cutout_margin: None,
        }
    }
}

fn default_layer() -> String {
    "top".to_string()
}

const fn default_margin() -> f64 {
    0.2
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
