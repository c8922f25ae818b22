//! Configuration and settings management for DotMatrix
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default location is
//! `<platform config dir>/dotmatrix/config.toml`.
//!
//! All lengths are millimeters in the robot's coordinate frame, whose origin
//! is the center of the draw field.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use dotmatrix_core::Point3D;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Draw field geometry, motion policy and accelerations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSettings {
    /// Draw field width (mm)
    pub field_width_mm: f64,
    /// Draw field height (mm)
    pub field_height_mm: f64,
    /// Maximum image width (dots)
    pub field_width_dots: usize,
    /// Maximum image height (dots)
    pub field_height_dots: usize,
    /// Spacing between neighbouring dots (mm)
    pub mm_per_dot: f64,
    /// Pen lift between nearby dots (mm above the drawing surface)
    pub elevation_small: f64,
    /// Pen lift for long jumps and calibration probes (mm above the drawing surface)
    pub elevation_large: f64,
    /// Travel distance above which the large lift is used (mm)
    pub movement_threshold: f64,
    /// Acceleration for printing moves
    pub acceleration: f64,
    /// Acceleration for calibration probes
    pub calibration_acceleration: f64,
    /// Safe position the effector returns to between jobs
    pub start_point: Point3D,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            field_width_mm: 75.0,
            field_height_mm: 75.0,
            field_width_dots: 75,
            field_height_dots: 75,
            mm_per_dot: 1.0,
            elevation_small: 1.5,
            elevation_large: 10.0,
            movement_threshold: 2.0,
            acceleration: 50.0,
            calibration_acceleration: 5.0,
            start_point: Point3D::new(0.0, 0.0, -196.063),
        }
    }
}

impl PrinterSettings {
    /// Validate the settings
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("field_width_mm", self.field_width_mm),
            ("field_height_mm", self.field_height_mm),
            ("mm_per_dot", self.mm_per_dot),
            ("movement_threshold", self.movement_threshold),
            ("acceleration", self.acceleration),
            ("calibration_acceleration", self.calibration_acceleration),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)));
            }
        }

        if self.field_width_dots == 0 || self.field_height_dots == 0 {
            return Err(SettingsError::invalid(
                "field_dots",
                "draw field must be at least one dot wide and high",
            ));
        }

        if !(self.elevation_small.is_finite() && self.elevation_small >= 0.0) {
            return Err(SettingsError::invalid("elevation_small", "must be >= 0"));
        }

        if !self.elevation_large.is_finite() || self.elevation_large < self.elevation_small {
            return Err(SettingsError::invalid(
                "elevation_large",
                "must be >= elevation_small",
            ));
        }

        let start = self.start_point;
        if !(start.x.is_finite() && start.y.is_finite() && start.z.is_finite()) {
            return Err(SettingsError::invalid("start_point", "must be finite"));
        }

        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Printer geometry and motion settings
    pub printer: PrinterSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("dotmatrix").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or fall back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.printer.validate()
    }
}

/// Supported config file formats
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        let mut settings = PrinterSettings::default();
        settings.mm_per_dot = 0.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("mm_per_dot"));
    }

    #[test]
    fn test_rejects_inverted_elevations() {
        let mut settings = PrinterSettings::default();
        settings.elevation_small = 5.0;
        settings.elevation_large = 2.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_field() {
        let mut settings = PrinterSettings::default();
        settings.field_height_dots = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_extension() {
        let err = Config::default()
            .save_to_file(Path::new("printer.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }
}
