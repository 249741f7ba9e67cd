//! Engine error taxonomy.
//!
//! All engine failures are local, synchronous and rejected before any
//! mutation — a failed call leaves the field and tilt state exactly as
//! they were. Violations are programming errors on the caller's side,
//! not operational ones, so there is no retry or recoverable class.

use thiserror::Error;

/// Errors raised by the sensor-state engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    /// Sensor or pixel index outside the 5×8 field.
    #[error("invalid index: sensor {sensor}, pixel {pixel}")]
    InvalidIndex {
        /// Offending sensor index.
        sensor: usize,
        /// Offending pixel index.
        pixel: usize,
    },

    /// Malformed parameter (non-positive spread, wrong frame size, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_display() {
        let err = RigError::InvalidIndex {
            sensor: 7,
            pixel: 9,
        };
        assert_eq!(err.to_string(), "invalid index: sensor 7, pixel 9");
    }

    #[test]
    fn invalid_parameter_display() {
        let err = RigError::InvalidParameter("spread must be positive".into());
        assert!(err.to_string().contains("spread must be positive"));
    }
}
