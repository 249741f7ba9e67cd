//! # SRADER Monitor Library
//!
//! Sensor-state classification and synthetic-sensor-feed engine for a
//! suspended stage-lighting rig. Ingests one tilt reading (two point
//! distances at a known baseline) and one 5×8 obstacle frame per tick,
//! classifies both into severity bands, and reduces them to a single
//! prioritized safety status.
//!
//! ## Pipeline
//!
//! 1. **[`feed`]** — a [`feed::SensorSource`] (hardware reader or the
//!    synthetic [`feed::SyntheticFeed`]) produces one reading set per tick
//! 2. **[`tilt`]** / **[`field`]** — estimate the tilt angle and maintain
//!    the obstacle distance field
//! 3. **[`classify`]** — map distances and angles onto severity bands
//! 4. **[`status`]** — priority reduction to one [`SafetyStatus`]
//! 5. **[`cycle`]** — the paced tick loop that drives 1–4 and emits a
//!    read-only [`RigSnapshot`] to the presentation layer
//!
//! The engine is single-threaded and tick-driven; consumers only ever see
//! immutable snapshot values, never a live handle into engine state.
//!
//! [`SafetyStatus`]: srader_common::state::SafetyStatus
//! [`RigSnapshot`]: srader_common::snapshot::RigSnapshot

pub mod classify;
pub mod cycle;
pub mod feed;
pub mod field;
pub mod status;
pub mod tilt;
