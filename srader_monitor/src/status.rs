//! Priority reduction of the two sensor streams to one safety status.
//!
//! Evaluated fresh every tick from the current readings — there is no
//! transition history. An obstacle inside the critical distance always
//! outranks a tilt excursion.

use srader_common::config::{DistanceBands, TiltBands};
use srader_common::reading::DistanceMm;
use srader_common::state::SafetyStatus;

/// Derive the overall rig status from the current tick's readings.
#[inline]
pub fn derive_status(
    tilt_angle_deg: f64,
    obstacle_min_mm: DistanceMm,
    distance_bands: &DistanceBands,
    tilt_bands: &TiltBands,
) -> SafetyStatus {
    if obstacle_min_mm < distance_bands.critical_mm {
        SafetyStatus::ObstacleCritical
    } else if tilt_angle_deg.abs() > tilt_bands.warning_deg {
        SafetyStatus::TiltWarning
    } else {
        SafetyStatus::Ok
    }
}
