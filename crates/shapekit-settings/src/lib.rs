//! ShapeKit Settings Crate
//!
//! Handles editor configuration: snapping defaults, shape editing limits and
//! viewport parameters, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, ShapeEditSettings, SnapModeSetting, SnappingSettings, ViewportSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
