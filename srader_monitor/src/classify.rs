//! Threshold classification of distances and tilt angles.
//!
//! Pure, total functions: every input magnitude maps to exactly one
//! severity band, no error path. The first matching ascending threshold
//! wins.

use srader_common::config::{DistanceBands, TiltBands};
use srader_common::reading::DistanceMm;
use srader_common::state::SeverityBand;

/// Classify an obstacle distance against the configured bands.
#[inline]
pub fn classify_distance(bands: &DistanceBands, distance_mm: DistanceMm) -> SeverityBand {
    if distance_mm < bands.critical_mm {
        SeverityBand::Critical
    } else if distance_mm < bands.warning_mm {
        SeverityBand::Warning
    } else if distance_mm < bands.caution_mm {
        SeverityBand::Caution
    } else if distance_mm < bands.normal_mm {
        SeverityBand::Normal
    } else {
        SeverityBand::Safe
    }
}

/// Classify a tilt angle magnitude against the configured bands.
///
/// Tilt has no Safe/Warning split — a level rig is simply Normal, and
/// anything at or beyond the warning angle is Critical.
#[inline]
pub fn classify_tilt(bands: &TiltBands, angle_abs_deg: f64) -> SeverityBand {
    if angle_abs_deg < bands.normal_deg {
        SeverityBand::Normal
    } else if angle_abs_deg < bands.warning_deg {
        SeverityBand::Caution
    } else {
        SeverityBand::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use srader_common::consts::{DIST_MAX_MM, DIST_MIN_MM};

    #[test]
    fn distance_band_boundaries() {
        let bands = DistanceBands::default();
        assert_eq!(classify_distance(&bands, 50), SeverityBand::Critical);
        assert_eq!(classify_distance(&bands, 299), SeverityBand::Critical);
        assert_eq!(classify_distance(&bands, 300), SeverityBand::Warning);
        assert_eq!(classify_distance(&bands, 599), SeverityBand::Warning);
        assert_eq!(classify_distance(&bands, 600), SeverityBand::Caution);
        assert_eq!(classify_distance(&bands, 999), SeverityBand::Caution);
        assert_eq!(classify_distance(&bands, 1000), SeverityBand::Normal);
        assert_eq!(classify_distance(&bands, 1999), SeverityBand::Normal);
        assert_eq!(classify_distance(&bands, 2000), SeverityBand::Safe);
        assert_eq!(classify_distance(&bands, 4000), SeverityBand::Safe);
    }

    #[test]
    fn tilt_band_boundaries_exact() {
        let bands = TiltBands::default();
        assert_eq!(classify_tilt(&bands, 0.0), SeverityBand::Normal);
        assert_eq!(classify_tilt(&bands, 4.999), SeverityBand::Normal);
        assert_eq!(classify_tilt(&bands, 5.0), SeverityBand::Caution);
        assert_eq!(classify_tilt(&bands, 14.999), SeverityBand::Caution);
        assert_eq!(classify_tilt(&bands, 15.0), SeverityBand::Critical);
        assert_eq!(classify_tilt(&bands, 45.0), SeverityBand::Critical);
    }

    proptest! {
        /// Increasing distance never increases severity.
        #[test]
        fn distance_classification_is_monotonic(
            a in DIST_MIN_MM..=DIST_MAX_MM,
            b in DIST_MIN_MM..=DIST_MAX_MM,
        ) {
            let bands = DistanceBands::default();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_distance(&bands, near) >= classify_distance(&bands, far));
        }

        /// Increasing tilt magnitude never decreases severity.
        #[test]
        fn tilt_classification_is_monotonic(a in 0.0f64..45.0, b in 0.0f64..45.0) {
            let bands = TiltBands::default();
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_tilt(&bands, small) <= classify_tilt(&bands, large));
        }
    }
}
