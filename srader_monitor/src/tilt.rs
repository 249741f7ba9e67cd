//! Tilt estimation from the two point-distance sensors.
//!
//! The two sensors hang at a fixed baseline separation and measure the
//! distance to the floor. A level rig reads the same distance on both
//! sides; tilting lengthens one reading and shortens the other, so the
//! angle falls out of the difference:
//!
//! - inverse model: `angle = atan((right − left) / gap)`
//! - forward model: `diff = tan(angle) · gap`, `left = base − diff/2`,
//!   `right = base + diff/2`
//!
//! The estimator itself is unconstrained — angles beyond the visual range
//! are reported as-is; rendering clamps, the estimator does not.

use srader_common::config::{RigGeometry, TiltBands};
use srader_common::reading::{DistanceMm, TiltReading, clamp_distance};
use srader_common::state::SeverityBand;

use crate::classify::classify_tilt;

/// Estimate the tilt angle [deg] from one tilt reading.
///
/// Positive when the right side hangs lower (reads farther).
#[inline]
pub fn angle_from_reading(geometry: &RigGeometry, reading: &TiltReading) -> f64 {
    let diff_mm = reading.right_mm as f64 - reading.left_mm as f64;
    (diff_mm / geometry.sensor_gap_mm).atan().to_degrees()
}

/// Forward model: synthesize the distance pair a given tilt angle would
/// produce. Used by the synthetic feed.
///
/// Distances are truncated to integer millimeters and clamped into the
/// measurable domain.
#[inline]
pub fn reading_from_angle(geometry: &RigGeometry, angle_deg: f64) -> TiltReading {
    let diff_mm = angle_deg.to_radians().tan() * geometry.sensor_gap_mm;
    TiltReading {
        left_mm: clamp_distance((geometry.base_height_mm - diff_mm / 2.0) as i64),
        right_mm: clamp_distance((geometry.base_height_mm + diff_mm / 2.0) as i64),
    }
}

/// Classified tilt state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltState {
    /// Left sensor distance [mm].
    pub left_mm: DistanceMm,
    /// Right sensor distance [mm].
    pub right_mm: DistanceMm,
    /// Estimated tilt angle [deg].
    pub angle_deg: f64,
    /// Tilt severity band.
    pub band: SeverityBand,
}

impl TiltState {
    /// Derive the tilt state from one reading.
    pub fn derive(reading: &TiltReading, geometry: &RigGeometry, bands: &TiltBands) -> Self {
        let angle_deg = angle_from_reading(geometry, reading);
        Self {
            left_mm: reading.left_mm,
            right_mm: reading.right_mm,
            angle_deg,
            band: classify_tilt(bands, angle_deg.abs()),
        }
    }
}
