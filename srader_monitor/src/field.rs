//! The obstacle distance field: 5 sensors × 8 pixels below the rig.
//!
//! Owns the distance matrix and everything derived from it: per-cell
//! severity, the global minimum, and the Gaussian person-injection used
//! by the synthetic feed. Bands and the minimum are recomputed on demand,
//! never stored redundantly.

use srader_common::config::DistanceBands;
use srader_common::consts::{DIST_MAX_MM, PIXELS_PER_SENSOR, SENSOR_COUNT};
use srader_common::error::RigError;
use srader_common::reading::{DistanceMm, ObstacleFrame, clamp_distance};
use srader_common::state::SeverityBand;

use crate::classify::classify_distance;

/// Center of the 8-pixel row, in pixel coordinates.
const CENTER_PIXEL: f64 = 3.5;

/// The 5×8 obstacle distance matrix.
///
/// Invariant: every cell stays within the measurable domain at every
/// observable instant, and the field always holds exactly 40 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleField {
    cells: [[DistanceMm; PIXELS_PER_SENSOR]; SENSOR_COUNT],
}

impl ObstacleField {
    /// Field with every cell at maximum distance (nothing detected).
    pub const fn new() -> Self {
        Self {
            cells: [[DIST_MAX_MM; PIXELS_PER_SENSOR]; SENSOR_COUNT],
        }
    }

    /// Build a field from a wire frame (sensor-major cell order).
    pub fn from_frame(frame: &ObstacleFrame) -> Self {
        let mut field = Self::new();
        for sensor in 0..SENSOR_COUNT {
            for pixel in 0..PIXELS_PER_SENSOR {
                field.cells[sensor][pixel] =
                    clamp_distance(frame.cells[sensor * PIXELS_PER_SENSOR + pixel] as i64);
            }
        }
        field
    }

    /// Flatten back into a wire frame (sensor-major cell order).
    pub fn to_frame(&self) -> ObstacleFrame {
        let mut frame = ObstacleFrame::open();
        for sensor in 0..SENSOR_COUNT {
            for pixel in 0..PIXELS_PER_SENSOR {
                frame.cells[sensor * PIXELS_PER_SENSOR + pixel] = self.cells[sensor][pixel];
            }
        }
        frame
    }

    /// Read one cell.
    ///
    /// # Errors
    /// [`RigError::InvalidIndex`] when either index is out of range.
    pub fn get(&self, sensor: usize, pixel: usize) -> Result<DistanceMm, RigError> {
        check_index(sensor, pixel)?;
        Ok(self.cells[sensor][pixel])
    }

    /// Write one cell; the distance is clamped into the measurable domain.
    ///
    /// # Errors
    /// [`RigError::InvalidIndex`] when either index is out of range; the
    /// field is untouched on rejection.
    pub fn set_pixel(
        &mut self,
        sensor: usize,
        pixel: usize,
        distance_mm: DistanceMm,
    ) -> Result<(), RigError> {
        check_index(sensor, pixel)?;
        self.cells[sensor][pixel] = clamp_distance(distance_mm as i64);
        Ok(())
    }

    /// Minimum distance over all 40 cells.
    ///
    /// Always defined — the field is non-empty by construction.
    pub fn min_distance(&self) -> DistanceMm {
        self.cells
            .iter()
            .flatten()
            .copied()
            .min()
            .unwrap_or(DIST_MAX_MM)
    }

    /// Classify one cell against the configured distance bands.
    pub fn classify_cell(
        &self,
        bands: &DistanceBands,
        sensor: usize,
        pixel: usize,
    ) -> Result<SeverityBand, RigError> {
        Ok(classify_distance(bands, self.get(sensor, pixel)?))
    }

    /// Overwrite one sensor's 8 pixels with a Gaussian obstacle profile.
    ///
    /// Models a person standing under the sensor: a bowl-shaped dip in
    /// distance centered between pixels 3 and 4, deepest at
    /// `center_distance_mm` and relaxing towards the maximum range at the
    /// edges. `spread_pixels` plays the role of the standard deviation
    /// (the person's shoulder width at sensor resolution).
    ///
    /// # Errors
    /// [`RigError::InvalidIndex`] for a bad sensor index,
    /// [`RigError::InvalidParameter`] when `spread_pixels` is not a
    /// positive finite number. The field is untouched on rejection.
    pub fn inject_person(
        &mut self,
        sensor: usize,
        center_distance_mm: DistanceMm,
        spread_pixels: f64,
    ) -> Result<(), RigError> {
        check_index(sensor, 0)?;
        if !(spread_pixels > 0.0) || !spread_pixels.is_finite() {
            return Err(RigError::InvalidParameter(format!(
                "spread_pixels must be a positive finite number, got {spread_pixels}"
            )));
        }

        let center = center_distance_mm as f64;
        let max = DIST_MAX_MM as f64;
        for pixel in 0..PIXELS_PER_SENSOR {
            let offset = pixel as f64 - CENTER_PIXEL;
            let exponent = -(offset * offset) / (2.0 * spread_pixels * spread_pixels);
            let dist = center + (max - center) * (1.0 - exponent.exp());
            self.cells[sensor][pixel] = clamp_distance(dist as i64);
        }
        Ok(())
    }
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn check_index(sensor: usize, pixel: usize) -> Result<(), RigError> {
    if sensor >= SENSOR_COUNT || pixel >= PIXELS_PER_SENSOR {
        return Err(RigError::InvalidIndex { sensor, pixel });
    }
    Ok(())
}
