//! # SRADER Monitor
//!
//! Tick driver for the stage-rig safety monitor. Loads the monitor
//! configuration, wires the synthetic sensor feed into the
//! classification engine, and emits one JSON snapshot line per tick on
//! stdout for the presentation layer to consume.
//!
//! A real hardware reader would replace the synthetic feed behind the
//! same `SensorSource` trait; everything downstream is unchanged.

use clap::Parser;
use srader_common::config::{ConfigError, ConfigLoader, LogLevel, MonitorConfig};
use srader_monitor::cycle::MonitorRunner;
use srader_monitor::feed::SyntheticFeed;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// SRADER Monitor — stage-rig safety monitoring engine
#[derive(Parser, Debug)]
#[command(name = "srader_monitor")]
#[command(version)]
#[command(about = "Sensor-state classification engine for a suspended stage-lighting rig")]
struct Args {
    /// Path to the monitor configuration TOML.
    #[arg(long, default_value = "config/monitor.toml")]
    config: PathBuf,

    /// Seed for the synthetic sensor feed (reproducible runs).
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (0 = run until interrupted).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Override the configured tick interval [ms].
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Enable verbose logging (DEBUG level), overriding the configured level.
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

/// A loaded configuration plus whether the file was absent.
struct LoadedConfig {
    config: MonitorConfig,
    used_defaults: bool,
}

fn main() {
    let args = Args::parse();

    // The configured log level must be known before the subscriber comes
    // up, so the config loads first; its outcome is logged right after.
    let loaded = load_monitor_config(&args);
    let config_level = match &loaded {
        Ok(loaded) => loaded.config.shared.log_level,
        Err(_) => LogLevel::default(),
    };
    setup_tracing(&args, config_level);

    info!("SRADER Monitor v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, loaded) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("SRADER Monitor shutdown complete");
}

fn run(
    args: &Args,
    loaded: Result<LoadedConfig, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let LoadedConfig {
        mut config,
        used_defaults,
    } = loaded?;
    if used_defaults {
        warn!(
            "No config file at '{}', using built-in defaults",
            args.config.display()
        );
    }

    if let Some(interval_ms) = args.interval_ms {
        config.monitor.tick_interval_ms = interval_ms;
        config.monitor.validate()?;
    }

    info!(
        "Config OK: service={}, tick_interval={}ms, gap={}mm, base_height={}mm",
        config.shared.service_name,
        config.monitor.tick_interval_ms,
        config.geometry.sensor_gap_mm,
        config.geometry.base_height_mm,
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Synthetic feed seed: {seed}");
    let feed = SyntheticFeed::seeded(seed, config.geometry);
    let mut runner = MonitorRunner::new(feed, config);

    // Setup signal handler for graceful shutdown.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let max_ticks = (args.ticks > 0).then_some(args.ticks);
    info!("Entering monitor loop");

    let stdout = std::io::stdout();
    let emit_running = running.clone();
    runner.run(&running, max_ticks, |snapshot| {
        match serde_json::to_string(snapshot) {
            Ok(line) => {
                use std::io::Write;
                let mut lock = stdout.lock();
                // A dead consumer (closed pipe) ends the run; losing
                // snapshots silently is worse than stopping.
                if let Err(e) = writeln!(lock, "{line}") {
                    warn!("stdout write failed, stopping: {e}");
                    emit_running.store(false, Ordering::SeqCst);
                }
            }
            Err(e) => warn!("failed to serialize snapshot: {e}"),
        }
    });

    info!(
        "Processed {} ticks (avg {}µs, max {}µs, {} overruns)",
        runner.stats.tick_count,
        runner.stats.avg_tick_ns() / 1_000,
        runner.stats.max_tick_ns / 1_000,
        runner.stats.overruns,
    );

    Ok(())
}

/// Load and validate the monitor configuration.
///
/// A missing file falls back to built-in defaults; a present but invalid
/// file is a hard error. Runs before the subscriber is up, so the caller
/// reports the fallback once logging is available.
fn load_monitor_config(args: &Args) -> Result<LoadedConfig, ConfigError> {
    let (config, used_defaults) = match MonitorConfig::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound) => (MonitorConfig::default(), true),
        Err(e) => return Err(e),
    };
    config.validate()?;
    Ok(LoadedConfig {
        config,
        used_defaults,
    })
}

/// Setup tracing subscriber from the configured level and CLI arguments.
///
/// `--verbose` overrides the configured level with DEBUG. Logs go to
/// stderr; stdout is reserved for the snapshot stream.
fn setup_tracing(args: &Args, config_level: LogLevel) {
    let level: Level = if args.verbose {
        Level::DEBUG
    } else {
        config_level.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
