//! The paced monitoring tick loop: read → classify → emit.
//!
//! Exactly one tick is processed at a time; no tick begins before the
//! previous tick's classification completes. The runner owns all mutable
//! state and hands consumers immutable [`RigSnapshot`] values only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use srader_common::config::MonitorConfig;
use srader_common::consts::{FIELD_CELLS, PIXELS_PER_SENSOR, SENSOR_COUNT};
use srader_common::snapshot::{CellSnapshot, RigSnapshot};
use srader_common::state::{SafetyStatus, SeverityBand};

use crate::classify::classify_distance;
use crate::feed::SensorSource;
use crate::field::ObstacleField;
use crate::status::derive_status;
use crate::tilt::TiltState;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-tick timing statistics.
///
/// Updated every tick with no allocation. Provides min/max/avg for tick
/// latency monitoring and overrun counting.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total ticks executed.
    pub tick_count: u64,
    /// Last tick duration [ns].
    pub last_tick_ns: i64,
    /// Minimum tick duration [ns].
    pub min_tick_ns: i64,
    /// Maximum tick duration [ns].
    pub max_tick_ns: i64,
    /// Running sum for average computation.
    pub sum_tick_ns: i64,
    /// Number of ticks that exceeded the configured interval.
    pub overruns: u64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            tick_count: 0,
            last_tick_ns: 0,
            min_tick_ns: i64::MAX,
            max_tick_ns: 0,
            sum_tick_ns: 0,
            overruns: 0,
        }
    }

    /// Record a tick duration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: i64) {
        self.tick_count += 1;
        self.last_tick_ns = duration_ns;
        if duration_ns < self.min_tick_ns {
            self.min_tick_ns = duration_ns;
        }
        if duration_ns > self.max_tick_ns {
            self.max_tick_ns = duration_ns;
        }
        self.sum_tick_ns += duration_ns;
    }

    /// Average tick time [ns] (returns 0 if no ticks).
    #[inline]
    pub fn avg_tick_ns(&self) -> i64 {
        if self.tick_count == 0 {
            0
        } else {
            self.sum_tick_ns / self.tick_count as i64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Monitor Runner ─────────────────────────────────────────────────

/// The main tick-driven monitor.
///
/// Owns the sensor source, the obstacle field, the configuration-derived
/// thresholds, and timing statistics. Each tick pulls one reading set
/// from the source and reduces it to a classified snapshot.
pub struct MonitorRunner<S: SensorSource> {
    source: S,
    config: MonitorConfig,
    field: ObstacleField,
    last_status: SafetyStatus,
    tick: u64,
    /// Tick timing statistics.
    pub stats: CycleStats,
}

impl<S: SensorSource> MonitorRunner<S> {
    /// Create a runner over a sensor source with a validated configuration.
    pub fn new(source: S, config: MonitorConfig) -> Self {
        Self {
            source,
            config,
            field: ObstacleField::new(),
            last_status: SafetyStatus::Ok,
            tick: 0,
            stats: CycleStats::new(),
        }
    }

    /// Most recent overall status.
    #[inline]
    pub fn status(&self) -> SafetyStatus {
        self.last_status
    }

    /// Process one tick: pull readings, classify, derive the status.
    ///
    /// Status transitions are logged once on change, not every tick.
    pub fn tick(&mut self) -> RigSnapshot {
        let (tilt_reading, frame) = self.source.next_tick();

        self.field = ObstacleField::from_frame(&frame);
        let tilt =
            TiltState::derive(&tilt_reading, &self.config.geometry, &self.config.tilt_bands);

        let mut cells = [CellSnapshot {
            distance_mm: 0,
            band: SeverityBand::Safe,
        }; FIELD_CELLS];
        for sensor in 0..SENSOR_COUNT {
            for pixel in 0..PIXELS_PER_SENSOR {
                // In-range by construction.
                let distance_mm = self.field.get(sensor, pixel).unwrap_or_default();
                cells[sensor * PIXELS_PER_SENSOR + pixel] = CellSnapshot {
                    distance_mm,
                    band: classify_distance(&self.config.distance_bands, distance_mm),
                };
            }
        }

        let obstacle_min_mm = self.field.min_distance();
        let status = derive_status(
            tilt.angle_deg,
            obstacle_min_mm,
            &self.config.distance_bands,
            &self.config.tilt_bands,
        );

        if status != self.last_status {
            match status {
                SafetyStatus::Ok => info!(
                    "status OK (tilt {:.1}°, min distance {obstacle_min_mm} mm)",
                    tilt.angle_deg
                ),
                SafetyStatus::TiltWarning => {
                    warn!("TILT WARNING: rig at {:.1}°", tilt.angle_deg)
                }
                SafetyStatus::ObstacleCritical => {
                    warn!("OBSTACLE DETECTED: minimum distance {obstacle_min_mm} mm")
                }
            }
            self.last_status = status;
        }

        self.tick += 1;
        RigSnapshot {
            tick: self.tick,
            tilt_angle_deg: tilt.angle_deg,
            tilt_band: tilt.band,
            tilt_left_mm: tilt.left_mm,
            tilt_right_mm: tilt.right_mm,
            cells,
            obstacle_min_mm,
            status,
        }
    }

    /// Paced tick loop.
    ///
    /// Runs until `running` is cleared or `max_ticks` is reached
    /// (`None` = run forever). Each snapshot is handed to `emit` before
    /// the pacing sleep; an overlong tick is counted as an overrun and
    /// the next tick starts immediately.
    pub fn run<F>(&mut self, running: &AtomicBool, max_ticks: Option<u64>, mut emit: F)
    where
        F: FnMut(&RigSnapshot),
    {
        let interval = self.config.monitor.interval();

        while running.load(Ordering::SeqCst) {
            if let Some(max) = max_ticks
                && self.tick >= max
            {
                break;
            }

            let tick_start = Instant::now();
            let snapshot = self.tick();
            emit(&snapshot);

            let elapsed = tick_start.elapsed();
            self.stats.record(elapsed.as_nanos() as i64);

            if let Some(remaining) = interval.checked_sub(elapsed) {
                sleep_interruptibly(running, remaining);
            } else {
                self.stats.overruns += 1;
                debug!(
                    "tick {} overran the {}ms interval ({:?})",
                    self.tick, self.config.monitor.tick_interval_ms, elapsed
                );
            }
        }
    }
}

/// Sleep in short slices so a shutdown request is honored promptly.
fn sleep_interruptibly(running: &AtomicBool, total: Duration) {
    const SLICE: Duration = Duration::from_millis(20);
    let deadline = Instant::now() + total;
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep(SLICE.min(deadline - now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srader_common::consts::DIST_MAX_MM;
    use srader_common::reading::{ObstacleFrame, TiltReading};

    /// Scripted source replaying a fixed list of readings.
    struct ScriptedSource {
        ticks: Vec<(TiltReading, ObstacleFrame)>,
        next: usize,
    }

    impl SensorSource for ScriptedSource {
        fn next_tick(&mut self) -> (TiltReading, ObstacleFrame) {
            let tick = self.ticks[self.next.min(self.ticks.len() - 1)];
            self.next += 1;
            tick
        }
    }

    fn level_reading() -> TiltReading {
        TiltReading {
            left_mm: 2000,
            right_mm: 2000,
        }
    }

    #[test]
    fn tick_produces_classified_snapshot() {
        let mut frame = ObstacleFrame::open();
        frame.cells[12] = 250;

        let source = ScriptedSource {
            ticks: vec![(level_reading(), frame)],
            next: 0,
        };
        let mut runner = MonitorRunner::new(source, MonitorConfig::default());

        let snapshot = runner.tick();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.tilt_angle_deg, 0.0);
        assert_eq!(snapshot.tilt_band, SeverityBand::Normal);
        assert_eq!(snapshot.obstacle_min_mm, 250);
        assert_eq!(snapshot.status, SafetyStatus::ObstacleCritical);
        assert_eq!(snapshot.cells[12].band, SeverityBand::Critical);
        assert_eq!(snapshot.cells[0].band, SeverityBand::Safe);
        assert_eq!(snapshot.cells[0].distance_mm, DIST_MAX_MM);
    }

    #[test]
    fn status_follows_readings_without_memory() {
        let mut blocked = ObstacleFrame::open();
        blocked.cells[0] = 100;

        let source = ScriptedSource {
            ticks: vec![
                (level_reading(), blocked),
                (level_reading(), ObstacleFrame::open()),
            ],
            next: 0,
        };
        let mut runner = MonitorRunner::new(source, MonitorConfig::default());

        assert_eq!(runner.tick().status, SafetyStatus::ObstacleCritical);
        // Clears immediately on the next tick; no hysteresis.
        assert_eq!(runner.tick().status, SafetyStatus::Ok);
        assert_eq!(runner.status(), SafetyStatus::Ok);
    }

    #[test]
    fn tilt_warning_from_distance_pair() {
        // ~21.8° tilt: diff = 200mm over a 500mm baseline.
        let source = ScriptedSource {
            ticks: vec![(
                TiltReading {
                    left_mm: 1900,
                    right_mm: 2100,
                },
                ObstacleFrame::open(),
            )],
            next: 0,
        };
        let mut runner = MonitorRunner::new(source, MonitorConfig::default());

        let snapshot = runner.tick();
        assert_eq!(snapshot.status, SafetyStatus::TiltWarning);
        assert_eq!(snapshot.tilt_band, SeverityBand::Critical);
        assert!((snapshot.tilt_angle_deg - 21.8).abs() < 0.1);
    }

    #[test]
    fn run_honors_max_ticks() {
        let source = ScriptedSource {
            ticks: vec![(level_reading(), ObstacleFrame::open())],
            next: 0,
        };
        let mut config = MonitorConfig::default();
        config.monitor.tick_interval_ms = 1;
        let mut runner = MonitorRunner::new(source, config);

        let running = AtomicBool::new(true);
        let mut emitted = 0u64;
        runner.run(&running, Some(3), |_| emitted += 1);

        assert_eq!(emitted, 3);
        assert_eq!(runner.stats.tick_count, 3);
    }

    #[test]
    fn run_stops_when_emit_clears_flag() {
        // An emitter that loses its consumer clears the flag; the loop
        // must not keep producing snapshots past that point.
        let source = ScriptedSource {
            ticks: vec![(level_reading(), ObstacleFrame::open())],
            next: 0,
        };
        let mut config = MonitorConfig::default();
        config.monitor.tick_interval_ms = 1;
        let mut runner = MonitorRunner::new(source, config);

        let running = AtomicBool::new(true);
        let mut emitted = 0u64;
        runner.run(&running, None, |_| {
            emitted += 1;
            running.store(false, Ordering::SeqCst);
        });
        assert_eq!(emitted, 1);
    }

    #[test]
    fn run_stops_when_flag_cleared() {
        let source = ScriptedSource {
            ticks: vec![(level_reading(), ObstacleFrame::open())],
            next: 0,
        };
        let mut runner = MonitorRunner::new(source, MonitorConfig::default());

        let running = AtomicBool::new(false);
        let mut emitted = 0u64;
        runner.run(&running, None, |_| emitted += 1);
        assert_eq!(emitted, 0);
    }

    #[test]
    fn cycle_stats_basic() {
        let mut stats = CycleStats::new();
        assert_eq!(stats.avg_tick_ns(), 0);

        stats.record(500_000);
        stats.record(700_000);
        assert_eq!(stats.tick_count, 2);
        assert_eq!(stats.min_tick_ns, 500_000);
        assert_eq!(stats.max_tick_ns, 700_000);
        assert_eq!(stats.last_tick_ns, 700_000);
        assert_eq!(stats.avg_tick_ns(), 600_000);
    }
}
