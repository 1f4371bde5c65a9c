use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tscli",
    about = "tiltscenes developer CLI: headless runs, live dashboard, wasm builds",
    version
)]
pub struct Cli {
    /// Stage config file. Defaults to tiltscenes.toml, searched upward
    /// from the current directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the stage headless at 60 Hz and report hand-offs
    Sim {
        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        /// Random seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
        /// Canvas size used for all three scenes, WIDTHxHEIGHT
        #[arg(long, default_value = "800x600", value_parser = parse_size)]
        size: (f32, f32),
        /// Front-back tilt in degrees, held for the whole run
        #[arg(long, allow_hyphen_values = true)]
        beta: Option<f64>,
        /// Left-right tilt in degrees, held for the whole run
        #[arg(long, allow_hyphen_values = true)]
        gamma: Option<f64>,
    },
    /// Live terminal dashboard; arrow keys tilt the simulated device
    Watch {
        /// Random seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
        /// Canvas size used for all three scenes, WIDTHxHEIGHT
        #[arg(long, default_value = "800x600", value_parser = parse_size)]
        size: (f32, f32),
    },
    /// Build the web runtime with wasm-pack
    Build {
        /// Unoptimised build
        #[arg(long)]
        dev: bool,
        /// Output directory for the generated package
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Parse `WIDTHxHEIGHT` with positive dimensions.
pub fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0 && v.is_finite())
            .ok_or_else(|| format!("invalid dimension {v:?}"))
    };
    Ok((parse(w)?, parse(h)?))
}
