//! Severity and status enums for the safety monitor.
//!
//! All enums use `#[repr(u8)]` for compact layout and stable wire values.
//! `SeverityBand` is totally ordered by increasing danger so band
//! comparisons read naturally (`band >= SeverityBand::Warning`).

use serde::{Deserialize, Serialize};

/// Severity of a single measurement, ordered by increasing danger.
///
/// Both distance and tilt classification map onto this band; they use
/// independent threshold tables but share the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SeverityBand {
    /// Nothing anywhere near the rig.
    Safe = 0,
    /// Expected operating range.
    Normal = 1,
    /// Worth watching.
    Caution = 2,
    /// Obstacle approaching the rig envelope.
    Warning = 3,
    /// Immediate hazard.
    Critical = 4,
}

impl SeverityBand {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Safe),
            1 => Some(Self::Normal),
            2 => Some(Self::Caution),
            3 => Some(Self::Warning),
            4 => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Overall rig safety status, recomputed fresh every tick.
///
/// A priority reduction over the current readings — it carries no memory
/// of previous ticks. An obstacle below the critical distance always wins
/// over a tilt excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SafetyStatus {
    /// Rig level and clear.
    Ok = 0,
    /// Tilt angle beyond the warning threshold.
    TiltWarning = 1,
    /// Obstacle inside the critical distance.
    ObstacleCritical = 2,
}

impl SafetyStatus {
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::TiltWarning),
            2 => Some(Self::ObstacleCritical),
            _ => None,
        }
    }
}

impl Default for SafetyStatus {
    fn default() -> Self {
        Self::Ok
    }
}
