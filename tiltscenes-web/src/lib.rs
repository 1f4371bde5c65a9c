//! tiltscenes WASM web runtime
//!
//! Three stacked canvases: bouncing bubbles, gravity cubes that follow the
//! device tilt, and bubbles again. Objects leaving one canvas re-enter the
//! next. Everything except the browser glue in `app` runs natively too, which
//! is how the CLI and the tests drive it.

#[cfg(target_arch = "wasm32")]
mod app;
pub mod bubbles;
pub mod config;
pub mod context;
pub mod cubes;
pub mod debug;
pub mod entities;
pub mod error;
pub mod handoff;
pub mod orientation;
pub mod physics;
pub mod rng;
pub mod scene;
pub mod scene_graph;
pub mod stage;
pub mod time;

pub use config::StageConfig;
pub use error::StageError;
pub use handoff::{Exit, Route, SceneSlot, ROUTES};
pub use stage::{pulse_scale, HandoffEvent, HandoffLog, Stage};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point, called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("tiltscenes runtime initialized");
}

/// Build the stage on the page's three canvases.
///
/// `config_toml` overrides the defaults; pass `undefined` to use them as is.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_app(config_toml: Option<String>) -> Result<app::App, JsValue> {
    app::App::new(config_toml).await
}
