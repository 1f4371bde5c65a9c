mod cli;
mod commands;
mod project;
mod state;
mod ui;

use clap::Parser;

use cli::{Cli, Command};
use commands::{build_cmd, resolve_seed, sim_cmd, watch_cmd};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // the dashboard owns the terminal; log lines would tear it
    if !matches!(cli.command, Command::Watch { .. }) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let ctx = project::detect_project_context(cli.config.as_deref())?;

    match cli.command {
        Command::Sim {
            ticks,
            seed,
            size,
            beta,
            gamma,
        } => {
            let options = sim_cmd::SimOptions {
                ticks,
                seed: resolve_seed(seed, ctx.config.seed),
                size,
                beta,
                gamma,
            };
            sim_cmd::run(options, ctx).await
        }
        Command::Watch { seed, size } => {
            let seed = resolve_seed(seed, ctx.config.seed);
            watch_cmd::run(seed, size, ctx).await
        }
        Command::Build { dev, out_dir } => build_cmd::run(dev, out_dir, ctx).await,
    }
}
