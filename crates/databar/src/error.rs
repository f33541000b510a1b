//! Error types for settings loading and rendering.

use databar_core::ColorParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised during a render pass.
///
/// These never escape [`DataBarVisual::update`](crate::DataBarVisual::update);
/// they are turned into a placeholder bar whose tooltip carries the message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A string setting holds a value outside its allowed set.
    #[error("{setting} must be one of {expected}, got '{value}'")]
    InvalidOption {
        setting: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A color setting could not be parsed.
    #[error("{setting} is not a valid color '{value}': {source}")]
    InvalidColor {
        setting: &'static str,
        value: String,
        #[source]
        source: ColorParseError,
    },
}

/// Errors raised while loading settings documents.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File could not be read.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one of yaml, yml, json or toml.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),
}
