//! ParticlesWay CLI - run the scene engine headless and check configs.

#![allow(clippy::doc_markdown, clippy::needless_pass_by_value)]

use clap::{Parser, Subcommand, ValueEnum};
use particlesway::stats::{format_compact, DashboardStats};
use particlesway::{
    ConfigError, Density, EngineConfig, EngineError, EngineSnapshot, LiveStats,
    ParticlesWayEngine, RandomWalkStats,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "particlesway")]
#[command(about = "Headless driver for the ParticlesWay scene engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine for a number of frames and report state changes
    Simulate {
        /// Engine config (YAML, TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override particle density (low, medium, high)
        #[arg(short, long)]
        density: Option<Density>,

        /// Frames to simulate
        #[arg(short, long, default_value = "180")]
        frames: u32,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Segment click as INDEX@SECONDS (repeatable)
        #[arg(long = "click")]
        clicks: Vec<ScheduledClick>,

        /// Reset the view at this time in seconds
        #[arg(long)]
        reset_at: Option<f64>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate an engine config file
    Check {
        /// Path to config file
        config: PathBuf,
    },

    /// Sample the simulated dashboard figures
    Stats {
        /// Number of 2 s refreshes to sample
        #[arg(short, long, default_value = "5")]
        ticks: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// A segment click at a point in simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledClick {
    segment: usize,
    at: f64,
}

impl FromStr for ScheduledClick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (segment, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected INDEX@SECONDS, got '{s}'"))?;
        let segment = segment
            .trim()
            .parse()
            .map_err(|_| format!("invalid segment index '{segment}'"))?;
        let at: f64 = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid time '{at}'"))?;
        if !at.is_finite() || at < 0.0 {
            return Err(format!("time must be a non-negative number, got '{at}'"));
        }
        Ok(Self { segment, at })
    }
}

// =============================================================================
// Simulation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct SimulationPlan {
    frames: u32,
    fps: f64,
    reset_at: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TimelineEvent {
    frame: u64,
    time: f64,
    event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SimulationReport {
    events: Vec<TimelineEvent>,
    #[serde(rename = "final")]
    final_state: EngineSnapshot,
}

fn simulate(
    engine: &mut ParticlesWayEngine,
    plan: SimulationPlan,
    clicks: &[ScheduledClick],
) -> Result<SimulationReport, CliError> {
    if !plan.fps.is_finite() || plan.fps <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "fps must be positive, got {}",
            plan.fps
        )));
    }

    let mut clicks = clicks.to_vec();
    clicks.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = clicks.into_iter().peekable();
    let mut reset_at = plan.reset_at;
    let mut events = Vec::new();
    let mut was_exploding = false;

    for i in 0..=plan.frames {
        let now = f64::from(i) / plan.fps;
        engine.tick_at(now * 1000.0);
        let frame = engine.clock().frame_count();

        if was_exploding && !engine.view().exploding {
            events.push(TimelineEvent {
                frame,
                time: now,
                event: "explosion ended".to_string(),
            });
        }

        while let Some(click) = pending.next_if(|c| c.at <= now) {
            if engine.handle_segment_click(click.segment)? {
                let name = engine
                    .view()
                    .selected
                    .map_or("", |index| engine.heart().segment(index).name);
                events.push(TimelineEvent {
                    frame,
                    time: now,
                    event: format!("segment {} ({name}) selected", click.segment),
                });
            }
        }
        if reset_at.is_some_and(|at| at <= now) {
            reset_at = None;
            engine.reset();
            events.push(TimelineEvent {
                frame,
                time: now,
                event: "view reset".to_string(),
            });
        }
        was_exploding = engine.view().exploding;
    }

    debug!(events = events.len(), "simulation finished");
    Ok(SimulationReport {
        events,
        final_state: engine.snapshot(),
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, CliError> {
    let config = match path {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn print_report(report: &SimulationReport, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            for event in &report.events {
                println!("[{:>7.3}s #{:<5}] {}", event.time, event.frame, event.event);
            }
            let s = &report.final_state;
            println!();
            println!("Simulated {:.2}s over {} frames", s.time, s.frame);
            println!("  Density:   {} ({} particles)", s.density, s.particles);
            match s.view.selected {
                Some(index) => println!(
                    "  Selected:  segment {index}{}",
                    if s.view.exploding { " (exploding)" } else { "" }
                ),
                None => println!("  Selected:  none"),
            }
            println!(
                "  Scales:    {}",
                s.segment_scales
                    .iter()
                    .map(|v| format!("{v:.3}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            println!("  Camera:    azimuth {:.3} rad", s.camera_azimuth);
            println!("  Loading:   {}%", s.loading_percent);
        }
    }
    Ok(())
}

// =============================================================================
// Commands
// =============================================================================

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Simulate {
            config,
            density,
            frames,
            fps,
            clicks,
            reset_at,
            seed,
            format,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(density) = density {
                config.particle_density = density;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            info!(frames, fps, clicks = clicks.len(), "starting simulation");
            let mut engine = ParticlesWayEngine::new(config);
            let plan = SimulationPlan {
                frames,
                fps,
                reset_at,
            };
            let report = simulate(&mut engine, plan, &clicks)?;
            engine.shutdown();
            print_report(&report, format)
        }
        Commands::Check { config } => {
            println!("Checking config: {}", config.display());
            let parsed = load_config(Some(&config))?;
            println!("Config valid!");
            print!("{}", parsed.to_yaml()?);
            Ok(())
        }
        Commands::Stats {
            ticks,
            seed,
            format,
        } => {
            let samples = sample_stats(ticks, seed);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
                OutputFormat::Text => {
                    for (i, s) in samples.iter().enumerate() {
                        println!(
                            "t={:>3}s  nodes {:>7}  gems {:>7}  particles/s {:>7}  uptime {:.2}%",
                            i * 2,
                            format_compact(s.total_nodes),
                            format_compact(s.active_gems),
                            format_compact(s.particles_per_second),
                            s.uptime_percent
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

fn sample_stats(ticks: u32, seed: Option<u64>) -> Vec<LiveStats> {
    let source = seed.map_or_else(RandomWalkStats::from_entropy, RandomWalkStats::seeded);
    let mut dashboard = DashboardStats::new(source);
    let mut samples = vec![*dashboard.current()];
    for _ in 0..ticks {
        dashboard.advance(Duration::from_secs(2));
        samples.push(*dashboard.current());
    }
    samples
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn engine() -> ParticlesWayEngine {
        ParticlesWayEngine::new(EngineConfig {
            particle_density: Density::Low,
            seed: Some(8),
            ..EngineConfig::default()
        })
    }

    fn plan(frames: u32) -> SimulationPlan {
        SimulationPlan {
            frames,
            fps: 60.0,
            reset_at: None,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scheduled_click() {
        assert_eq!(
            "2@0.5".parse::<ScheduledClick>(),
            Ok(ScheduledClick { segment: 2, at: 0.5 })
        );
        assert!("2".parse::<ScheduledClick>().is_err());
        assert!("x@1".parse::<ScheduledClick>().is_err());
        assert!("1@-3".parse::<ScheduledClick>().is_err());
    }

    #[test]
    fn test_parse_simulate_args() {
        let cli = Cli::try_parse_from([
            "particlesway",
            "simulate",
            "--density",
            "medium",
            "--click",
            "1@0.5",
            "--click",
            "3@1",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                density,
                clicks,
                format,
                frames,
                ..
            } => {
                assert_eq!(density, Some(Density::Medium));
                assert_eq!(clicks.len(), 2);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(frames, 180);
            }
            _ => panic!("expected simulate"),
        }
        assert!(Cli::try_parse_from(["particlesway", "simulate", "--density", "ultra"]).is_err());
    }

    #[test]
    fn test_simulation_timeline() {
        let mut engine = engine();
        let clicks = [ScheduledClick { segment: 2, at: 0.5 }];
        let report = simulate(&mut engine, plan(180), &clicks).unwrap();

        assert_eq!(report.events.len(), 2);
        assert_eq!(report.events[0].event, "segment 2 (Purple) selected");
        assert_eq!(report.events[1].event, "explosion ended");
        let ended = report.events[1].time;
        assert!(ended >= 2.5 && ended < 2.55, "ended at {ended}");

        let s = &report.final_state;
        assert_eq!(s.frame, 181);
        assert_eq!(s.particles, 3_000);
        assert!(!s.view.exploding);
    }

    #[test]
    fn test_simulation_reset() {
        let mut engine = engine();
        let clicks = [ScheduledClick { segment: 0, at: 0.0 }];
        let report = simulate(
            &mut engine,
            SimulationPlan {
                reset_at: Some(1.0),
                ..plan(120)
            },
            &clicks,
        )
        .unwrap();
        let names: Vec<_> = report.events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, ["segment 0 (Teal) selected", "view reset"]);
        assert_eq!(report.final_state.view.selected, None);
    }

    #[test]
    fn test_simulation_rejects_bad_input() {
        let mut engine = engine();
        assert!(matches!(
            simulate(&mut engine, SimulationPlan { fps: 0.0, ..plan(10) }, &[]),
            Err(CliError::InvalidArgument(_))
        ));
        let clicks = [ScheduledClick { segment: 7, at: 0.0 }];
        assert!(matches!(
            simulate(&mut engine, plan(10), &clicks),
            Err(CliError::Engine(EngineError::InvalidSegment { index: 7, .. }))
        ));
    }

    #[test]
    fn test_report_json_shape() {
        let mut engine = engine();
        let report = simulate(&mut engine, plan(10), &[]).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["events"].as_array().unwrap().is_empty());
        assert_eq!(json["final"]["density"], "low");
    }

    #[test]
    fn test_sample_stats_bounds() {
        let samples = sample_stats(4, Some(3));
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], LiveStats::default());
        for pair in samples.windows(2) {
            assert!(pair[1].active_gems >= pair[0].active_gems);
            assert!((95_000..105_000).contains(&pair[1].particles_per_second));
        }
    }
}
