//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across all SRADER applications, plus the monitor's own configuration
//! surface: tick interval, rig geometry and both severity threshold tables.
//!
//! # Usage
//!
//! ```rust,no_run
//! use srader_common::config::{ConfigLoader, MonitorConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), srader_common::config::ConfigError> {
//!     let config = MonitorConfig::load(Path::new("config/monitor.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::consts::{
    DEFAULT_BASE_HEIGHT_MM, DEFAULT_SENSOR_GAP_MM, DEFAULT_TICK_INTERVAL_MS, DIST_MAX_MM,
    DIST_MIN_MM,
};
use crate::reading::DistanceMm;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Common configuration fields shared across all SRADER applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "srader-monitor-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            service_name: "srader-monitor".to_string(),
        }
    }
}

/// Distance severity thresholds [mm], ascending.
///
/// A measurement strictly below `critical_mm` is Critical, below
/// `warning_mm` Warning, below `caution_mm` Caution, below `normal_mm`
/// Normal, otherwise Safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceBands {
    /// Obstacle distance below which the status goes critical.
    #[serde(default = "DistanceBands::default_critical")]
    pub critical_mm: DistanceMm,
    /// Warning band upper bound.
    #[serde(default = "DistanceBands::default_warning")]
    pub warning_mm: DistanceMm,
    /// Caution band upper bound.
    #[serde(default = "DistanceBands::default_caution")]
    pub caution_mm: DistanceMm,
    /// Normal band upper bound; at or above this is Safe.
    #[serde(default = "DistanceBands::default_normal")]
    pub normal_mm: DistanceMm,
}

impl DistanceBands {
    fn default_critical() -> DistanceMm {
        300
    }
    fn default_warning() -> DistanceMm {
        600
    }
    fn default_caution() -> DistanceMm {
        1000
    }
    fn default_normal() -> DistanceMm {
        2000
    }

    /// Validate that the thresholds ascend strictly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.critical_mm < self.warning_mm
            && self.warning_mm < self.caution_mm
            && self.caution_mm < self.normal_mm)
        {
            return Err(ConfigError::ValidationError(format!(
                "distance bands must ascend strictly: {} < {} < {} < {}",
                self.critical_mm, self.warning_mm, self.caution_mm, self.normal_mm
            )));
        }
        if self.normal_mm > DIST_MAX_MM {
            return Err(ConfigError::ValidationError(format!(
                "normal_mm {} exceeds measurable maximum {DIST_MAX_MM}",
                self.normal_mm
            )));
        }
        Ok(())
    }
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self {
            critical_mm: Self::default_critical(),
            warning_mm: Self::default_warning(),
            caution_mm: Self::default_caution(),
            normal_mm: Self::default_normal(),
        }
    }
}

/// Tilt severity thresholds [deg], ascending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltBands {
    /// Absolute angle below which the rig counts as level.
    #[serde(default = "TiltBands::default_normal")]
    pub normal_deg: f64,
    /// Absolute angle at or above which the tilt is critical; also the
    /// system-status warning boundary.
    #[serde(default = "TiltBands::default_warning")]
    pub warning_deg: f64,
}

impl TiltBands {
    fn default_normal() -> f64 {
        5.0
    }
    fn default_warning() -> f64 {
        15.0
    }

    /// Validate that the thresholds are positive and ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.normal_deg > 0.0 && self.normal_deg < self.warning_deg) {
            return Err(ConfigError::ValidationError(format!(
                "tilt bands must satisfy 0 < normal_deg < warning_deg, got {} / {}",
                self.normal_deg, self.warning_deg
            )));
        }
        Ok(())
    }
}

impl Default for TiltBands {
    fn default() -> Self {
        Self {
            normal_deg: Self::default_normal(),
            warning_deg: Self::default_warning(),
        }
    }
}

/// Physical mounting geometry of the tilt sensor pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigGeometry {
    /// Baseline separation of the two tilt sensors [mm].
    #[serde(default = "RigGeometry::default_gap")]
    pub sensor_gap_mm: f64,
    /// Reference mounting height of the rig [mm].
    #[serde(default = "RigGeometry::default_height")]
    pub base_height_mm: f64,
}

impl RigGeometry {
    fn default_gap() -> f64 {
        DEFAULT_SENSOR_GAP_MM
    }
    fn default_height() -> f64 {
        DEFAULT_BASE_HEIGHT_MM
    }

    /// Validate the geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_gap_mm <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "sensor_gap_mm must be positive, got {}",
                self.sensor_gap_mm
            )));
        }
        let (min, max) = (DIST_MIN_MM as f64, DIST_MAX_MM as f64);
        if self.base_height_mm < min || self.base_height_mm > max {
            return Err(ConfigError::ValidationError(format!(
                "base_height_mm must lie in the measurable domain [{min}, {max}], got {}",
                self.base_height_mm
            )));
        }
        Ok(())
    }
}

impl Default for RigGeometry {
    fn default() -> Self {
        Self {
            sensor_gap_mm: Self::default_gap(),
            base_height_mm: Self::default_height(),
        }
    }
}

/// Tick pacing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickConfig {
    /// Interval between sensing/simulation ticks [ms].
    #[serde(default = "TickConfig::default_interval")]
    pub tick_interval_ms: u64,
}

impl TickConfig {
    fn default_interval() -> u64 {
        DEFAULT_TICK_INTERVAL_MS
    }

    /// Tick interval as a `Duration`.
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate the pacing settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::default_interval(),
        }
    }
}

/// Complete monitor configuration.
///
/// Every section carries serde defaults, so a partial (or absent) file
/// yields the documented default behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Shared service settings.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Tick pacing.
    #[serde(default)]
    pub monitor: TickConfig,
    /// Tilt sensor mounting geometry.
    #[serde(default)]
    pub geometry: RigGeometry,
    /// Distance severity thresholds.
    #[serde(default)]
    pub distance_bands: DistanceBands,
    /// Tilt severity thresholds.
    #[serde(default)]
    pub tilt_bands: TiltBands,
}

impl MonitorConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.monitor.validate()?;
        self.geometry.validate()?;
        self.distance_bands.validate()?;
        self.tilt_bands.validate()?;
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
/// - Returns `ConfigError::ValidationError` if semantic validation fails
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
