//! Settings errors.
//!
//! `SettingsError` is what every public entry point returns. `ConfigError`
//! covers problems with the file itself and converts into it.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("No platform config directory")]
    NoConfigDirectory,

    #[error("Config file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config could not be written as TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("Unsupported config file extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// An open interval check failed.
    #[error("'{key}' = {value} is outside ({min}, {max})")]
    ValueOutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;
