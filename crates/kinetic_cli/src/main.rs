//! Kinetic CLI
//!
//! Inspect interpolator curves and play animation presets on a virtual clock.

mod config;
mod curve;
mod play;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinetic_animation::Interpolator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::KineticConfig;

#[derive(Parser, Debug)]
#[command(name = "kinetic")]
#[command(about = "Time-driven animation engine toolbox", version)]
struct Cli {
    /// Config file (defaults to ./kinetic.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample an interpolator over [0, 1]
    Curve {
        /// Interpolator, e.g. `linear`, `overshoot:2`, `cubic-bezier:0.25,0.1,0.25,1`
        #[arg(default_value = "linear")]
        interpolator: String,

        /// Number of samples including both endpoints
        #[arg(short, long)]
        samples: Option<usize>,
    },

    /// Play a preset frame by frame
    Play {
        /// Preset name (fade-in, fade-out, zoom-in, pulse, spin, slide-in, drop-in)
        preset: String,

        /// Preset duration in milliseconds
        #[arg(short, long)]
        duration: Option<u32>,

        /// Virtual time between frames in milliseconds
        #[arg(short, long)]
        frame_ms: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_logging(config: &KineticConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = KineticConfig::load(cli.config.as_deref())?;
    init_logging(&config);

    match cli.command {
        Commands::Curve {
            interpolator,
            samples,
        } => cmd_curve(&config, &interpolator, samples),
        Commands::Play {
            preset,
            duration,
            frame_ms,
        } => cmd_play(&config, &preset, duration, frame_ms),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn cmd_curve(config: &KineticConfig, text: &str, samples: Option<usize>) -> Result<()> {
    let interpolator: Interpolator = text
        .parse()
        .with_context(|| format!("Invalid interpolator '{}'", text))?;
    let samples = samples.unwrap_or(config.curve.samples);
    tracing::debug!(%interpolator, samples, "sampling curve");

    println!("{}", interpolator);
    let points = curve::sample_curve(&interpolator, samples);
    for row in curve::render_curve(&points, config.curve.width) {
        println!("{}", row);
    }
    Ok(())
}

fn cmd_play(
    config: &KineticConfig,
    preset: &str,
    duration: Option<u32>,
    frame_ms: Option<u64>,
) -> Result<()> {
    let duration_ms = duration.unwrap_or(config.playback.duration_ms);
    let frame_ms = frame_ms.unwrap_or(config.playback.frame_ms);
    if frame_ms == 0 {
        anyhow::bail!("Frame interval must be greater than zero");
    }

    let animation = play::build_preset(preset, duration_ms)?;
    tracing::info!(preset, duration_ms, frame_ms, "playing");

    for report in play::play(animation, frame_ms, config.playback.max_frames) {
        println!("{}", report.render());
    }
    Ok(())
}
