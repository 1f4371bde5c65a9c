use glam::Vec2;
use tiltscenes_wgpu::{RenderError, ShapeRenderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use crate::config::StageConfig;
use crate::error::StageError;
use crate::handoff::SceneSlot;
use crate::orientation::MotionPermission;
use crate::stage::{pulse_transform, Stage};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One canvas and the renderer presenting to it.
struct CanvasView {
    slot: SceneSlot,
    canvas: HtmlCanvasElement,
    renderer: ShapeRenderer,
    /// CSS size last handed to the scene.
    css_size: (u32, u32),
}

/// Main application state for the WASM runtime.
#[wasm_bindgen]
pub struct App {
    stage: Stage,
    views: Vec<CanvasView>,
    button: Option<HtmlElement>,
    debug_line: Option<Element>,
}

fn css_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    (canvas.client_width().max(1) as u32, canvas.client_height().max(1) as u32)
}

fn find_canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, StageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| StageError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| StageError::CanvasNotFound(format!("{id} is not a canvas")))
}

impl App {
    pub async fn new(config_toml: Option<String>) -> Result<App, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object"))?;

        let mut config = match config_toml.as_deref() {
            Some(text) => StageConfig::from_toml_str(text).map_err(js_err)?,
            None => StageConfig::default(),
        };
        let hash = window.location().hash().unwrap_or_default();
        config.debug |= hash.trim_start_matches('#') == "debug";

        let pixel_ratio = window.device_pixel_ratio().max(1.0);
        let mut canvases = Vec::with_capacity(3);
        for (slot, id) in SceneSlot::ALL.into_iter().zip(&config.canvases.ids) {
            let canvas = find_canvas(&document, id).map_err(js_err)?;
            canvases.push((slot, id.clone(), canvas));
        }

        let sizes = canvases.iter().map(|(_, _, canvas)| {
            let (w, h) = css_size(canvas);
            Vec2::new(w as f32, h as f32)
        });
        let sizes: Vec<Vec2> = sizes.collect();
        let stage = Stage::new(&config, [sizes[0], sizes[1], sizes[2]], js_sys::Date::now() as u64);

        let mut views = Vec::with_capacity(3);
        for (slot, id, canvas) in canvases {
            let (w, h) = css_size(&canvas);
            let (pw, ph) = ((w as f64 * pixel_ratio) as u32, (h as f64 * pixel_ratio) as u32);
            canvas.set_width(pw);
            canvas.set_height(ph);
            let renderer = ShapeRenderer::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), pw, ph)
                .await
                .map_err(|e| {
                    js_err(StageError::Renderer {
                        canvas: id.clone(),
                        reason: e.to_string(),
                    })
                })?;
            log::info!("Renderer ready for {id} ({pw}x{ph})");
            views.push(CanvasView {
                slot,
                canvas,
                renderer,
                css_size: (w, h),
            });
        }

        let button = document
            .get_element_by_id(&config.canvases.button)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let debug_line = document.get_element_by_id(&config.canvases.debug_line);

        Ok(App {
            stage,
            views,
            button,
            debug_line,
        })
    }

    /// Follow CSS size changes of the canvases.
    fn sync_sizes(&mut self) {
        let pixel_ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);
        for view in &mut self.views {
            let size = css_size(&view.canvas);
            if size == view.css_size {
                continue;
            }
            view.css_size = size;
            let (pw, ph) = ((size.0 as f64 * pixel_ratio) as u32, (size.1 as f64 * pixel_ratio) as u32);
            view.canvas.set_width(pw);
            view.canvas.set_height(ph);
            view.renderer.resize(pw, ph);
            self.stage.resize(view.slot, size.0 as f32, size.1 as f32);
        }
    }
}

#[wasm_bindgen]
impl App {
    /// Run one frame. Called from requestAnimationFrame.
    pub fn frame(&mut self, time: f64) {
        self.sync_sizes();
        self.stage.update(time);

        for view in &mut self.views {
            let scene = self.stage.scene(view.slot).base();
            match view
                .renderer
                .render(&scene.frame_uniforms(), &scene.instances(), scene.clear_color)
            {
                Ok(()) => {}
                Err(RenderError::SurfaceReconfigured) => log::debug!("{}: surface reconfigured", scene.id),
                Err(e) => log::warn!("{}: {e}", scene.id),
            }
        }

        if let Some(button) = &self.button {
            let transform = pulse_transform(self.stage.ctx.time.elapsed);
            if let Err(e) = button.style().set_property("transform", &transform) {
                log::warn!("Failed to style button: {e:?}");
            }
        }
        if self.stage.ctx.debug.active {
            if let Some(line) = &self.debug_line {
                line.set_text_content(Some(&self.stage.ctx.debug.dom_debug));
            }
        }
    }

    /// Forward a `deviceorientation` event. Angles the device does not
    /// report arrive as `null`.
    pub fn on_device_orientation(&mut self, alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> bool {
        self.stage.on_device_orientation(alpha, beta, gamma)
    }

    /// Record the outcome of [`request_motion_access`].
    pub fn set_motion_permission(&mut self, state: &str) {
        self.stage.ctx.set_motion_permission(MotionPermission::from_response(state));
    }

    pub fn set_param(&mut self, name: &str, value: f32) -> Result<f32, JsValue> {
        self.stage.set_param(name, value).map_err(js_err)
    }

    pub fn param_names(&self) -> Vec<String> {
        self.stage.param_names()
    }

    /// `[value, min, max, step]` for the slider of `name`, or `undefined`.
    pub fn param_slider(&self, name: &str) -> Option<Vec<f32>> {
        self.stage.param_slider(name).map(|s| s.to_vec())
    }

    pub fn debug_active(&self) -> bool {
        self.stage.ctx.debug.active
    }

    pub fn population(&self) -> usize {
        self.stage.population()
    }
}

/// Ask for motion sensor access. Must run inside a user gesture on iOS.
/// Resolves to `"granted"`, `"denied"` or `"not-required"`.
#[wasm_bindgen]
pub async fn request_motion_access() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let event_class = js_sys::Reflect::get(&window, &JsValue::from_str("DeviceOrientationEvent"))?;
    if event_class.is_undefined() {
        log::warn!("DeviceOrientationEvent is not supported");
        return Ok(MotionPermission::Denied.label().to_string());
    }

    let request = js_sys::Reflect::get(&event_class, &JsValue::from_str("requestPermission"))?;
    let Some(request) = request.dyn_ref::<js_sys::Function>() else {
        return Ok(MotionPermission::NotRequired.label().to_string());
    };
    let promise: js_sys::Promise = request.call0(&event_class)?.dyn_into()?;
    let response = wasm_bindgen_futures::JsFuture::from(promise).await?;
    let permission = MotionPermission::from_response(&response.as_string().unwrap_or_default());
    log::info!("Motion access: {}", permission.label());
    Ok(permission.label().to_string())
}
