//! End-to-end monitor tests: seeded feed → runner → snapshot stream.

use std::sync::atomic::AtomicBool;

use srader_common::config::MonitorConfig;
use srader_common::consts::{DIST_MAX_MM, DIST_MIN_MM, FIELD_CELLS};
use srader_common::reading::{ObstacleFrame, TiltReading};
use srader_common::state::{SafetyStatus, SeverityBand};
use srader_monitor::classify::classify_distance;
use srader_monitor::cycle::MonitorRunner;
use srader_monitor::feed::{SensorSource, SyntheticFeed};

fn runner_with_seed(seed: u64) -> MonitorRunner<SyntheticFeed<rand::rngs::StdRng>> {
    let config = MonitorConfig::default();
    let feed = SyntheticFeed::seeded(seed, config.geometry);
    MonitorRunner::new(feed, config)
}

#[test]
fn snapshots_are_internally_consistent() {
    let config = MonitorConfig::default();
    let mut runner = runner_with_seed(11);

    for expected_tick in 1..=2_000u64 {
        let snapshot = runner.tick();
        assert_eq!(snapshot.tick, expected_tick);

        // The reported minimum really is the minimum of the cells.
        let min = snapshot
            .cells
            .iter()
            .map(|c| c.distance_mm)
            .min()
            .unwrap();
        assert_eq!(snapshot.obstacle_min_mm, min);

        // Every cell band matches its distance; single source of truth.
        for cell in &snapshot.cells {
            assert!((DIST_MIN_MM..=DIST_MAX_MM).contains(&cell.distance_mm));
            assert_eq!(
                cell.band,
                classify_distance(&config.distance_bands, cell.distance_mm)
            );
        }

        // The status honors the fixed priority order.
        let expected_status = if min < config.distance_bands.critical_mm {
            SafetyStatus::ObstacleCritical
        } else if snapshot.tilt_angle_deg.abs() > config.tilt_bands.warning_deg {
            SafetyStatus::TiltWarning
        } else {
            SafetyStatus::Ok
        };
        assert_eq!(snapshot.status, expected_status);
    }
}

#[test]
fn two_seeded_runners_emit_identical_snapshots() {
    let mut a = runner_with_seed(99);
    let mut b = runner_with_seed(99);

    for _ in 0..1_000 {
        let sa = a.tick();
        let sb = b.tick();
        assert_eq!(sa.tick, sb.tick);
        assert_eq!(sa.tilt_angle_deg.to_bits(), sb.tilt_angle_deg.to_bits());
        assert_eq!(sa.tilt_band, sb.tilt_band);
        assert_eq!(sa.cells, sb.cells);
        assert_eq!(sa.obstacle_min_mm, sb.obstacle_min_mm);
        assert_eq!(sa.status, sb.status);
    }
}

#[test]
fn run_loop_emits_serializable_snapshots() {
    let mut config = MonitorConfig::default();
    config.monitor.tick_interval_ms = 1;
    let feed = SyntheticFeed::seeded(3, config.geometry);
    let mut runner = MonitorRunner::new(feed, config);

    let running = AtomicBool::new(true);
    let mut lines = Vec::new();
    runner.run(&running, Some(5), |snapshot| {
        lines.push(serde_json::to_string(snapshot).unwrap());
    });

    assert_eq!(lines.len(), 5);
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), FIELD_CELLS);
        assert!(value["tick"].as_u64().unwrap() >= 1);
        assert!(value["status"].is_string());
    }
}

#[test]
fn custom_thresholds_shift_the_status() {
    // A 10° tilt is a warning once warning_deg drops to 8.
    let mut config = MonitorConfig::default();
    config.tilt_bands.warning_deg = 8.0;
    config.validate().unwrap();

    struct TiltedSource;
    impl SensorSource for TiltedSource {
        fn next_tick(&mut self) -> (TiltReading, ObstacleFrame) {
            // diff = 88mm over 500mm baseline ≈ 10°.
            (
                TiltReading {
                    left_mm: 1956,
                    right_mm: 2044,
                },
                ObstacleFrame::open(),
            )
        }
    }

    let mut runner = MonitorRunner::new(TiltedSource, config);
    let snapshot = runner.tick();
    assert_eq!(snapshot.status, SafetyStatus::TiltWarning);
    assert_eq!(snapshot.tilt_band, SeverityBand::Critical);
}
