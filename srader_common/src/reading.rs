//! Raw per-tick sensor readings — the inbound interface of the engine.
//!
//! One `TiltReading` (two point distances at a known baseline) and one
//! `ObstacleFrame` (5 sensors × 8 pixels, sensor-major) arrive per tick,
//! either from a hardware reader or from the synthetic feed.

use serde::{Deserialize, Serialize};

use crate::consts::{DIST_MAX_MM, DIST_MIN_MM, FIELD_CELLS};
use crate::error::RigError;

/// One sensor pixel's measured or simulated distance [mm].
///
/// Domain-clamped to [`DIST_MIN_MM`], [`DIST_MAX_MM`] at every observable
/// instant.
pub type DistanceMm = u16;

/// Clamp an arbitrary millimeter value into the measurable domain.
#[inline]
pub fn clamp_distance(value_mm: i64) -> DistanceMm {
    value_mm.clamp(DIST_MIN_MM as i64, DIST_MAX_MM as i64) as DistanceMm
}

/// The two tilt-sensor point distances for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiltReading {
    /// Left sensor distance [mm].
    pub left_mm: DistanceMm,
    /// Right sensor distance [mm].
    pub right_mm: DistanceMm,
}

/// All 40 obstacle pixel distances for one tick, sensor-major.
///
/// Cell `sensor * 8 + pixel` holds pixel `pixel` of sensor `sensor`.
/// Serialize-only: frames are produced in-process and emitted, never
/// parsed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObstacleFrame {
    /// Pixel distances [mm].
    #[serde(serialize_with = "crate::serialize_cell_array")]
    pub cells: [DistanceMm; FIELD_CELLS],
}

impl ObstacleFrame {
    /// Frame with every cell at the maximum distance (nothing detected).
    pub const fn open() -> Self {
        Self {
            cells: [DIST_MAX_MM; FIELD_CELLS],
        }
    }

    /// Build a frame from a dynamically sized slice.
    ///
    /// # Errors
    /// Returns [`RigError::InvalidParameter`] when the slice does not hold
    /// exactly 40 cells.
    pub fn from_slice(cells: &[DistanceMm]) -> Result<Self, RigError> {
        let cells: [DistanceMm; FIELD_CELLS] = cells.try_into().map_err(|_| {
            RigError::InvalidParameter(format!(
                "obstacle frame must hold {FIELD_CELLS} cells, got {}",
                cells.len()
            ))
        })?;
        Ok(Self { cells })
    }
}

impl Default for ObstacleFrame {
    fn default() -> Self {
        Self::open()
    }
}
