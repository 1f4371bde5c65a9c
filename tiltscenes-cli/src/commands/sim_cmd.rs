use std::fmt::Write;

use tiltscenes_web::{SceneSlot, Stage, StageConfig};

use crate::project::ProjectContext;
use crate::state::sizes;

/// Frame length of the headless clock.
const FRAME_MS: f64 = 1000.0 / 60.0;

pub struct SimOptions {
    pub ticks: u64,
    pub seed: u64,
    pub size: (f32, f32),
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

pub async fn run(options: SimOptions, ctx: ProjectContext) -> anyhow::Result<()> {
    if let Some(path) = &ctx.config_path {
        log::info!("Using config {}", path.display());
    }
    let stage = simulate(&ctx.config, &options);
    print!("{}", report(&stage, &options));
    Ok(())
}

/// Run the stage for `options.ticks` frames of a 60 Hz clock.
pub fn simulate(config: &StageConfig, options: &SimOptions) -> Stage {
    let mut stage = Stage::new(config, sizes(options.size), options.seed);
    if options.beta.is_some() || options.gamma.is_some() {
        stage.on_device_orientation(None, options.beta, options.gamma);
    }
    for tick in 0..options.ticks {
        stage.update(tick as f64 * FRAME_MS);
    }
    stage
}

pub fn report(stage: &Stage, options: &SimOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} frames ({:.1}s simulated), seed {}",
        options.ticks,
        stage.ctx.time.elapsed / 1000.0,
        options.seed
    );
    if !stage.ctx.debug.dom_debug.is_empty() {
        let _ = writeln!(out, "gravity {}", stage.ctx.debug.dom_debug);
    }
    let _ = writeln!(out);
    for slot in SceneSlot::ALL {
        let _ = writeln!(out, "{:<8} {:>4} objects", slot.label(), stage.scene(slot).object_count());
    }
    let _ = writeln!(out, "{:<8} {:>4} objects", "total", stage.population());
    let _ = writeln!(out);
    for (route, count) in stage.log().counts() {
        let _ = writeln!(out, "{:<28} {count:>6}", route.label());
    }
    let _ = writeln!(out, "{:<28} {:>6}", "hand-offs", stage.log().total());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ticks: u64) -> SimOptions {
        SimOptions {
            ticks,
            seed: 21,
            size: (800.0, 600.0),
            beta: None,
            gamma: None,
        }
    }

    #[test]
    fn test_population_is_conserved() {
        let config = StageConfig::default();
        let stage = simulate(&config, &options(600));
        assert_eq!(stage.population(), 30);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let config = StageConfig::default();
        let a = simulate(&config, &options(300));
        let b = simulate(&config, &options(300));
        let counts_a: Vec<u64> = a.log().counts().map(|(_, n)| n).collect();
        let counts_b: Vec<u64> = b.log().counts().map(|(_, n)| n).collect();
        assert_eq!(counts_a, counts_b);
    }

    #[test]
    fn test_bubbles_alone_keep_moving_between_scenes() {
        let mut config = StageConfig::default();
        config.cubes.count = 0;
        let stage = simulate(&config, &options(1200));
        assert!(stage.log().total() > 0);
        assert_eq!(stage.population(), 20);
    }

    #[test]
    fn test_tilt_is_reported() {
        let config = StageConfig::default();
        let mut opts = options(1);
        opts.gamma = Some(-45.0);
        let stage = simulate(&config, &opts);
        let text = report(&stage, &opts);
        assert!(text.contains("gravity -0.50, 0.00"), "{text}");
        assert!(text.contains("scene 2 down -> scene 3"));
        assert!(text.contains("total"));
    }
}
