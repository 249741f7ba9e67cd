//! System-wide constants for the SRADER workspace.
//!
//! Single source of truth for rig geometry and sensor field dimensions.
//! Imported by all crates — no duplication permitted.

/// Number of downward-facing multi-pixel distance sensors.
pub const SENSOR_COUNT: usize = 5;

/// Number of distance pixels per sensor.
pub const PIXELS_PER_SENSOR: usize = 8;

/// Total number of cells in the obstacle field.
pub const FIELD_CELLS: usize = SENSOR_COUNT * PIXELS_PER_SENSOR;

/// Minimum measurable distance [mm].
pub const DIST_MIN_MM: u16 = 50;

/// Maximum measurable distance [mm].
pub const DIST_MAX_MM: u16 = 4000;

/// Default tick interval in milliseconds (5 Hz).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Default baseline separation of the two tilt sensors [mm].
pub const DEFAULT_SENSOR_GAP_MM: f64 = 500.0;

/// Default reference mounting height of the rig [mm].
pub const DEFAULT_BASE_HEIGHT_MM: f64 = 2000.0;
