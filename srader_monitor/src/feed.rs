//! Sensor sources: the inbound boundary of the engine.
//!
//! A [`SensorSource`] produces one tilt reading and one obstacle frame per
//! tick. In production that would be a hardware reader; this crate ships
//! the [`SyntheticFeed`], a software source that evolves physically
//! plausible readings from only the previous tick's state: bounded random
//! walks, occasional spike events, and Gaussian-shaped person obstacles.
//!
//! Randomness is injected (`R: Rng`), so a fixed seed reproduces an
//! identical tick sequence.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use srader_common::config::RigGeometry;
use srader_common::consts::{FIELD_CELLS, PIXELS_PER_SENSOR, SENSOR_COUNT};
use srader_common::reading::{ObstacleFrame, TiltReading, clamp_distance};

use crate::field::ObstacleField;
use crate::tilt::reading_from_angle;

/// Maximum per-tick tilt perturbation [deg].
const TILT_STEP_DEG: f64 = 2.0;

/// Soft reflecting boundary for the simulated angle [deg], open interval.
const TILT_LIMIT_DEG: f64 = 30.0;

/// Maximum per-tick pixel perturbation [mm].
const PIXEL_STEP_MM: f64 = 50.0;

/// Probability of one spike event per tick.
const SPIKE_PROBABILITY: f64 = 0.02;

/// Above this distance a spike turns into a sudden near obstacle,
/// at or below it into a sudden clearing.
const SPIKE_CLEAR_THRESHOLD_MM: u16 = 1000;

/// Probability of a person-injection event per tick.
const PERSON_PROBABILITY: f64 = 0.10;

/// One simulated tick of sensor data per call.
///
/// The production counterpart would read the tilt pair and the five
/// multi-pixel sensors off the bus and fill in the same two values.
pub trait SensorSource {
    /// Produce the next tick's readings.
    fn next_tick(&mut self) -> (TiltReading, ObstacleFrame);
}

/// Synthetic sensor feed: a bounded random walk over tilt and obstacle
/// state, with rare discrete events layered on top.
#[derive(Debug, Clone)]
pub struct SyntheticFeed<R: Rng> {
    rng: R,
    geometry: RigGeometry,
    angle_deg: f64,
    field: ObstacleField,
}

impl SyntheticFeed<StdRng> {
    /// Seeded feed for reproducible runs: the same seed yields a
    /// byte-identical sequence of readings.
    pub fn seeded(seed: u64, geometry: RigGeometry) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), geometry)
    }
}

impl<R: Rng> SyntheticFeed<R> {
    /// Feed with a caller-supplied random source.
    ///
    /// Starts level (angle 0) with a fully open obstacle field.
    pub fn with_rng(rng: R, geometry: RigGeometry) -> Self {
        Self {
            rng,
            geometry,
            angle_deg: 0.0,
            field: ObstacleField::new(),
        }
    }

    /// Current simulated tilt angle [deg].
    #[inline]
    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Random walk on the tilt angle with a soft reflecting boundary.
    ///
    /// When a step would leave the open interval (−30, 30) the
    /// perturbation is applied in the opposite direction instead —
    /// reflect once, never iterate and never hard-clamp.
    fn step_tilt(&mut self) {
        let step = self.rng.gen_range(-TILT_STEP_DEG..TILT_STEP_DEG);
        self.angle_deg += step;
        if !(-TILT_LIMIT_DEG < self.angle_deg && self.angle_deg < TILT_LIMIT_DEG) {
            self.angle_deg -= step * 2.0;
        }
    }

    /// Per-pixel bounded random walk over all 40 cells.
    fn step_pixels(&mut self) {
        for sensor in 0..SENSOR_COUNT {
            for pixel in 0..PIXELS_PER_SENSOR {
                // Cell accessors cannot fail for in-range indices.
                let current = self.field.get(sensor, pixel).unwrap_or_default() as f64;
                let next = current + self.rng.gen_range(-PIXEL_STEP_MM..PIXEL_STEP_MM);
                let _ = self.field.set_pixel(sensor, pixel, clamp_distance(next as i64));
            }
        }
    }

    /// At most one spike per tick: a sudden near obstacle under a far
    /// cell, or a sudden clearing under a near one.
    fn maybe_spike(&mut self) {
        if self.rng.gen_range(0.0..1.0) >= SPIKE_PROBABILITY {
            return;
        }
        let cell = self.rng.gen_range(0..FIELD_CELLS);
        let (sensor, pixel) = (cell / PIXELS_PER_SENSOR, cell % PIXELS_PER_SENSOR);
        let current = self.field.get(sensor, pixel).unwrap_or_default();
        let new = if current > SPIKE_CLEAR_THRESHOLD_MM {
            self.rng.gen_range(50..=299)
        } else {
            self.rng.gen_range(1500..=4000)
        };
        let _ = self.field.set_pixel(sensor, pixel, new);
    }

    /// Occasionally drop a person under one sensor, overwriting its 8
    /// pixels for this tick.
    fn maybe_person(&mut self) {
        if self.rng.gen_range(0.0..1.0) >= PERSON_PROBABILITY {
            return;
        }
        let sensor = self.rng.gen_range(0..SENSOR_COUNT);
        let center_mm = self.rng.gen_range(400..=1200);
        let spread = self.rng.gen_range(1.5..2.5);
        // Drawn from valid ranges; injection cannot fail.
        let _ = self.field.inject_person(sensor, center_mm, spread);
    }
}

impl<R: Rng> SensorSource for SyntheticFeed<R> {
    fn next_tick(&mut self) -> (TiltReading, ObstacleFrame) {
        self.step_tilt();
        self.step_pixels();
        self.maybe_spike();
        self.maybe_person();

        (
            reading_from_angle(&self.geometry, self.angle_deg),
            self.field.to_frame(),
        )
    }
}
