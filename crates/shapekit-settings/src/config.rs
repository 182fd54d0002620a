//! Configuration and settings management for ShapeKit
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Snapping settings (grid, angle and scale increments, snap mode)
//! - Shape edit settings (pick distance, point spacing, undo depth)
//! - Viewport settings (camera frustum, selection tolerance)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Surface that dragged points follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapModeSetting {
    /// Follow the construction plane only
    #[default]
    None,
    /// Follow the terrain surface
    Terrain,
    /// Follow scene geometry
    Geometry,
}

impl std::fmt::Display for SnapModeSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Terrain => write!(f, "Terrain"),
            Self::Geometry => write!(f, "Geometry"),
        }
    }
}

/// Grid, angle and scale snapping preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnappingSettings {
    /// Grid cell size in world units
    pub grid_size: f64,
    /// Multiplier applied to the grid size
    pub grid_scale: f64,
    /// Every Nth grid line is drawn as a major line
    pub grid_major_line: u32,
    /// Angle snapping increment in degrees
    pub angle_snap: f64,
    /// Scale snapping increment
    pub scale_snap: f64,
    pub grid_snapping: bool,
    pub angle_snapping: bool,
    pub scale_snapping: bool,
    #[serde(default)]
    pub snap_mode: SnapModeSetting,
    /// Align dragged points to the surface normal
    #[serde(default)]
    pub snap_to_normal: bool,
    #[serde(default)]
    pub pivot_snapping: bool,
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            grid_scale: 1.0,
            grid_major_line: 16,
            angle_snap: 5.0,
            scale_snap: 0.1,
            grid_snapping: true,
            angle_snapping: true,
            scale_snapping: false,
            snap_mode: SnapModeSetting::None,
            snap_to_normal: false,
            pivot_snapping: false,
        }
    }
}

/// Shape editing limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeEditSettings {
    /// Base pick distance for points and edges, scaled by the view
    pub close_distance: f64,
    /// Two points closer than this on every axis are rejected
    pub min_point_distance: f64,
    /// Height added above the surface when placing points
    pub z_offset: f64,
    /// Maximum number of undo steps kept
    pub undo_depth: usize,
}

impl Default for ShapeEditSettings {
    fn default() -> Self {
        Self {
            close_distance: 0.8,
            min_point_distance: 0.1,
            z_offset: 0.1,
            undo_depth: 100,
        }
    }
}

/// Viewport camera and picking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Extra pick tolerance added to every hit test
    pub selection_tolerance: f64,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    pub near_plane: f64,
    pub far_plane: f64,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            selection_tolerance: 0.0,
            fov_degrees: 60.0,
            near_plane: 0.25,
            far_plane: 1024.0,
            width: 1280,
            height: 720,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub snapping: SnappingSettings,
    #[serde(default)]
    pub shape_edit: ShapeEditSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file (`<config dir>/shapekit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDirectory)?;
        Ok(base.join("shapekit").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults if the file is missing
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Self::format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |key: &str, value: f64| -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: "must be > 0".to_string(),
                })
            }
        };
        let non_negative = |key: &str, value: f64| -> SettingsResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: "must be >= 0".to_string(),
                })
            }
        };

        // Snapping
        positive("snapping.grid_size", self.snapping.grid_size)?;
        positive("snapping.grid_scale", self.snapping.grid_scale)?;
        non_negative("snapping.angle_snap", self.snapping.angle_snap)?;
        non_negative("snapping.scale_snap", self.snapping.scale_snap)?;

        // Shape editing
        positive("shape_edit.close_distance", self.shape_edit.close_distance)?;
        non_negative("shape_edit.min_point_distance", self.shape_edit.min_point_distance)?;
        non_negative("shape_edit.z_offset", self.shape_edit.z_offset)?;
        if self.shape_edit.undo_depth == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "shape_edit.undo_depth".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        // Viewport
        non_negative("viewport.selection_tolerance", self.viewport.selection_tolerance)?;
        let fov = self.viewport.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "viewport.fov_degrees".to_string(),
                value: fov,
                min: 0.0,
                max: 180.0,
            }
            .into());
        }
        positive("viewport.near_plane", self.viewport.near_plane)?;
        if self.viewport.far_plane <= self.viewport.near_plane {
            return Err(SettingsError::InvalidSetting {
                key: "viewport.far_plane".to_string(),
                reason: "must be greater than near_plane".to_string(),
            });
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "viewport.size".to_string(),
                reason: "dimensions must be > 0".to_string(),
            });
        }

        Ok(())
    }

    fn format_of(path: &Path) -> SettingsResult<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.unwrap_or("").to_string(),
            }
            .into()),
        }
    }
}

enum Format {
    Json,
    Toml,
}
