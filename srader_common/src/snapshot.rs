//! Per-tick classified snapshot — the outbound interface of the engine.
//!
//! The presentation layer receives one `RigSnapshot` per tick and renders
//! it without re-deriving bands or status; the engine is the single source
//! of truth for all classification.

use serde::Serialize;

use crate::consts::FIELD_CELLS;
use crate::reading::DistanceMm;
use crate::state::{SafetyStatus, SeverityBand};

/// One obstacle cell with its classified severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    /// Measured distance [mm].
    pub distance_mm: DistanceMm,
    /// Severity band for this cell.
    pub band: SeverityBand,
}

/// Everything the presentation layer needs for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct RigSnapshot {
    /// Tick counter (monotonic, starts at 1 for the first tick).
    pub tick: u64,
    /// Estimated tilt angle [deg]; positive when the right side hangs lower.
    pub tilt_angle_deg: f64,
    /// Tilt severity band.
    pub tilt_band: SeverityBand,
    /// Left tilt sensor distance [mm].
    pub tilt_left_mm: DistanceMm,
    /// Right tilt sensor distance [mm].
    pub tilt_right_mm: DistanceMm,
    /// All 40 obstacle cells, sensor-major.
    #[serde(serialize_with = "crate::serialize_cell_array")]
    pub cells: [CellSnapshot; FIELD_CELLS],
    /// Minimum distance over all cells [mm].
    pub obstacle_min_mm: DistanceMm,
    /// Prioritized overall safety status.
    pub status: SafetyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_to_json() {
        let cell = CellSnapshot {
            distance_mm: 4000,
            band: SeverityBand::Safe,
        };
        let snapshot = RigSnapshot {
            tick: 1,
            tilt_angle_deg: -2.5,
            tilt_band: SeverityBand::Normal,
            tilt_left_mm: 2010,
            tilt_right_mm: 1989,
            cells: [cell; FIELD_CELLS],
            obstacle_min_mm: 4000,
            status: SafetyStatus::Ok,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"tick\":1"));
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"band\":\"safe\""));
        assert!(json.contains("\"obstacle_min_mm\":4000"));
    }
}
