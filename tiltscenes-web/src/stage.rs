use std::collections::VecDeque;

use glam::Vec2;

use crate::bubbles::SceneBouncingBubbles;
use crate::config::StageConfig;
use crate::context::GlobalContext;
use crate::cubes::SceneGravityCubes;
use crate::debug::DebugParam;
use crate::entities::ObjectId;
use crate::error::StageError;
use crate::handoff::{arrival, bubble_exit, cube_exit, route, Arrival, Exit, Route, SceneSlot, ROUTES};
use crate::orientation::DeviceOrientation;
use crate::scene::Scenario;

/// Number of hand-offs kept in [`HandoffLog`].
pub const HANDOFF_LOG_CAPACITY: usize = 256;

/// Folder of the stage's own debug parameters.
pub const MAIN_FOLDER: &str = "main";

/// Horizontal scale of the permission button at `elapsed_ms`. Pulses
/// between 1 and 1.05.
pub fn pulse_scale(elapsed_ms: f64) -> f64 {
    1.0 + ((5.0 * elapsed_ms / 1000.0).cos() / 2.0 + 0.5) / 20.0
}

/// CSS `transform` value for the permission button.
pub fn pulse_transform(elapsed_ms: f64) -> String {
    format!("scale({}, 1)", pulse_scale(elapsed_ms))
}

/// One object crossing from one canvas to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandoffEvent {
    pub frame: u64,
    pub route: Route,
    /// Where the replacement was created, in the target scene's coordinates.
    pub position: Vec2,
}

/// The last [`HANDOFF_LOG_CAPACITY`] hand-offs plus running totals per route.
#[derive(Debug, Clone)]
pub struct HandoffLog {
    events: VecDeque<HandoffEvent>,
    counts: [u64; 6],
    capacity: usize,
}

impl HandoffLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            counts: [0; 6],
            capacity,
        }
    }

    pub fn record(&mut self, event: HandoffEvent) {
        self.counts[event.route.index()] += 1;
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &HandoffEvent> + ExactSizeIterator {
        self.events.iter()
    }

    pub fn count(&self, route: Route) -> u64 {
        self.counts[route.index()]
    }

    /// Every route with its running total, in [`ROUTES`] order.
    pub fn counts(&self) -> impl Iterator<Item = (Route, u64)> + '_ {
        ROUTES.into_iter().map(move |r| (r, self.counts[r.index()]))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// An object that left its scene this tick.
#[derive(Debug, Clone, Copy)]
struct Departure {
    from: SceneSlot,
    exit: Exit,
    id: ObjectId,
    x: f32,
    velocity: Vec2,
}

/// The three stacked scenes and the loop that moves objects between them.
pub struct Stage {
    pub ctx: GlobalContext,
    scene1: SceneBouncingBubbles,
    scene2: SceneGravityCubes,
    scene3: SceneBouncingBubbles,
    log: HandoffLog,
    /// The `main/test` debug value. Nothing reads it yet.
    test: f32,
}

impl Stage {
    /// Build the stage. `sizes` are the canvas sizes top to bottom;
    /// `fallback_seed` is used when the config has no seed.
    pub fn new(config: &StageConfig, sizes: [Vec2; 3], fallback_seed: u64) -> Self {
        let seed = config.seed.unwrap_or(fallback_seed);
        let mut ctx = GlobalContext::new(config.debug, seed);
        let ids = &config.canvases.ids;

        let scene1 = SceneBouncingBubbles::new(&ids[0], sizes[0].x, sizes[0].y, config, &mut ctx);
        let scene2 = SceneGravityCubes::new(&ids[1], sizes[1].x, sizes[1].y, config, &mut ctx);
        let scene3 = SceneBouncingBubbles::new(&ids[2], sizes[2].x, sizes[2].y, config, &mut ctx);
        let test = ctx.debug.add(MAIN_FOLDER, "test", 0.0, 0.0, 10.0, None);

        log::info!("Stage ready (seed {seed}, debug {})", ctx.debug.active);
        Self {
            ctx,
            scene1,
            scene2,
            scene3,
            log: HandoffLog::new(HANDOFF_LOG_CAPACITY),
            test,
        }
    }

    /// One display frame at `now_ms`: advance every scene, then move the
    /// objects that left their canvas. Returns the number of hand-offs.
    pub fn update(&mut self, now_ms: f64) -> usize {
        self.ctx.time.tick(now_ms);
        let dt = self.ctx.time.delta_seconds();

        for (name, value) in self.ctx.debug.take_changed(MAIN_FOLDER) {
            if name == "test" {
                self.test = value;
            }
        }

        self.scene1.update(&mut self.ctx, dt);
        self.scene2.update(&mut self.ctx, dt);
        self.scene3.update(&mut self.ctx, dt);

        self.transfer()
    }

    /// Snapshot every exit first, then remove, then create. Objects created
    /// here are not boundary-tested until the next tick.
    fn transfer(&mut self) -> usize {
        let mut departures = Vec::new();

        for (from, scene) in [(SceneSlot::One, &self.scene1), (SceneSlot::Three, &self.scene3)] {
            let height = scene.height();
            departures.extend(scene.bubbles().into_iter().filter_map(|b| {
                bubble_exit(b.position.y, height).map(|exit| Departure {
                    from,
                    exit,
                    id: b.id,
                    x: b.position.x,
                    velocity: b.velocity,
                })
            }));
        }
        let height = self.scene2.height();
        departures.extend(self.scene2.cubes().into_iter().filter_map(|c| {
            cube_exit(c.position.y, height).map(|exit| Departure {
                from: SceneSlot::Two,
                exit,
                id: c.id,
                x: c.position.x,
                velocity: c.velocity,
            })
        }));

        for d in &departures {
            match d.from {
                SceneSlot::One => self.scene1.remove_bubble(d.id),
                SceneSlot::Two => self.scene2.remove_cube(d.id),
                SceneSlot::Three => self.scene3.remove_bubble(d.id),
            };
        }

        for d in &departures {
            let route = route(d.from, d.exit);
            let position = self.arrive(route, d);
            log::debug!("Hand-off {}: x={:.1} -> ({:.1}, {:.1})", route.label(), d.x, position.x, position.y);
            self.log.record(HandoffEvent {
                frame: self.ctx.time.frame,
                route,
                position,
            });
        }

        departures.len()
    }

    fn arrive(&mut self, route: Route, d: &Departure) -> Vec2 {
        let target = self.size(route.to);
        match arrival(route, d.x, d.velocity, target) {
            Arrival::Cube { position } => {
                self.scene2.add_cube(position.x, position.y);
                position
            }
            Arrival::Bubble { position, velocity } => {
                let scene = match route.to {
                    SceneSlot::Three => &mut self.scene3,
                    _ => &mut self.scene1,
                };
                let id = scene.add_bubble(position.x, position.y);
                if let Some(spawned) = scene.bubble(id) {
                    scene.set_bubble_velocity(id, velocity.apply(spawned.velocity));
                }
                position
            }
        }
    }

    /// Store a `deviceorientation` reading and pass it to the scenes if
    /// anything listens. Returns whether it was forwarded.
    pub fn on_device_orientation(&mut self, alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> bool {
        self.ctx.orientation = DeviceOrientation::new(alpha, beta, gamma);
        if !self.ctx.accepts_orientation() {
            return false;
        }
        self.scene1.on_device_orientation(&mut self.ctx);
        self.scene2.on_device_orientation(&mut self.ctx);
        self.scene3.on_device_orientation(&mut self.ctx);
        true
    }

    pub fn resize(&mut self, slot: SceneSlot, width: f32, height: f32) {
        match slot {
            SceneSlot::One => self.scene1.resize(width, height),
            SceneSlot::Two => self.scene2.resize(width, height),
            SceneSlot::Three => self.scene3.resize(width, height),
        }
    }

    pub fn size(&self, slot: SceneSlot) -> Vec2 {
        let scene = self.scene(slot);
        Vec2::new(scene.width(), scene.height())
    }

    /// Set a debug parameter by its `"folder/name"` key. Scenes pick the
    /// change up on their next update.
    pub fn set_param(&mut self, key: &str, value: f32) -> Result<f32, StageError> {
        self.ctx.debug.set(key, value)
    }

    pub fn param_names(&self) -> Vec<String> {
        self.ctx.debug.keys()
    }

    /// `[value, min, max, step]` of a debug parameter, for building a slider.
    pub fn param_slider(&self, key: &str) -> Option<[f32; 4]> {
        self.ctx.debug.param(key).map(DebugParam::slider)
    }

    pub fn scene(&self, slot: SceneSlot) -> &dyn Scenario {
        match slot {
            SceneSlot::One => &self.scene1,
            SceneSlot::Two => &self.scene2,
            SceneSlot::Three => &self.scene3,
        }
    }

    /// All scenes, top to bottom.
    pub fn scenes(&self) -> [&dyn Scenario; 3] {
        [&self.scene1, &self.scene2, &self.scene3]
    }

    pub fn bubbles_top(&self) -> &SceneBouncingBubbles {
        &self.scene1
    }

    pub fn cubes(&self) -> &SceneGravityCubes {
        &self.scene2
    }

    pub fn bubbles_bottom(&self) -> &SceneBouncingBubbles {
        &self.scene3
    }

    pub fn log(&self) -> &HandoffLog {
        &self.log
    }

    pub fn test_value(&self) -> f32 {
        self.test
    }

    /// Bubbles plus cubes across every scene.
    pub fn population(&self) -> usize {
        self.scenes().iter().map(|s| s.object_count()).sum()
    }
}
