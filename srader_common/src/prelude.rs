//! Prelude module for common re-exports.
//!
//! Consumers can do `use srader_common::prelude::*;` and get the most
//! important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, DistanceBands, MonitorConfig, RigGeometry, SharedConfig, TickConfig,
    TiltBands,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DIST_MAX_MM, DIST_MIN_MM, FIELD_CELLS, PIXELS_PER_SENSOR, SENSOR_COUNT};

// ─── Data Model ─────────────────────────────────────────────────────
pub use crate::error::RigError;
pub use crate::reading::{DistanceMm, ObstacleFrame, TiltReading, clamp_distance};
pub use crate::snapshot::{CellSnapshot, RigSnapshot};
pub use crate::state::{SafetyStatus, SeverityBand};
