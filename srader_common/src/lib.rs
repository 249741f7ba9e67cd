//! SRADER Common Library
//!
//! This crate provides the shared data model, constants and configuration
//! loading utilities for the SRADER stage-rig safety monitor workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Rig geometry and sensor field constants
//! - [`state`] - Severity bands and the derived safety status
//! - [`reading`] - Raw per-tick sensor readings (inbound interface)
//! - [`snapshot`] - Per-tick classified snapshot (outbound interface)
//! - [`error`] - Engine error taxonomy
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience

pub mod config;

/// Serialize a fixed-size cell array as a sequence; serde's derive only
/// covers arrays up to 32 elements and `FIELD_CELLS` is 40.
pub(crate) fn serialize_cell_array<T, S>(cells: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    T: serde::Serialize,
    S: serde::Serializer,
{
    serializer.collect_seq(cells)
}
pub mod consts;
pub mod error;
pub mod prelude;
pub mod reading;
pub mod snapshot;
pub mod state;
