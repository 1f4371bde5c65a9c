use glam::Vec2;
use tiltscenes_gpu_shared::palette::{shape_color, SHAPE_COLORS};

use crate::config::{BubblesConfig, StageConfig};
use crate::context::GlobalContext;
use crate::entities::{Bubble, BubbleState, ObjectId, Wall};
use crate::physics::{PhysicsWorld, Runner};
use crate::rng::Rng;
use crate::scene::{CameraKind, Scenario, Scene3D};

/// Side walls are invisible; thick enough that fast bubbles cannot tunnel.
const WALL_THICKNESS: f32 = 100.0;

/// Weightless bubbles bouncing between the left and right edges of the
/// canvas. Top and bottom are open; whatever leaves there is the stage's
/// business.
pub struct SceneBouncingBubbles {
    base: Scene3D,
    world: PhysicsWorld,
    runner: Runner,
    rng: Rng,
    config: BubblesConfig,
    /// Multiplier for the velocity of new bubbles, from the debug panel.
    speed: f32,
    wall_left: Wall,
    wall_right: Wall,
    bubbles: Vec<Bubble>,
    next_id: u64,
}

impl SceneBouncingBubbles {
    pub fn new(id: &str, width: f32, height: f32, config: &StageConfig, ctx: &mut GlobalContext) -> Self {
        let mut base = Scene3D::new(id, width, height, CameraKind::Screen);
        let mut world = PhysicsWorld::new(config.physics.gravity, config.physics.length_unit);
        let speed = ctx.debug.add(id, "speed", config.bubbles.speed, -1.0, 1.0, None);

        let wall_left = Wall::new(&mut world, &mut base.graph, None, 1.0);
        let wall_right = Wall::new(&mut world, &mut base.graph, None, 1.0);

        let mut scene = Self {
            base,
            world,
            runner: Runner::new(config.physics.timestep, config.physics.max_substeps),
            rng: ctx.rng.fork(),
            config: config.bubbles.clone(),
            speed,
            wall_left,
            wall_right,
            bubbles: Vec::new(),
            next_id: 0,
        };
        scene.layout_walls();

        for _ in 0..scene.config.count {
            let x = scene.rng.range(0.0, scene.base.width());
            let y = scene.rng.range(0.0, scene.base.height());
            scene.add_bubble(x, y);
        }

        log::info!(
            "Scene {id}: {} bubbles in {}x{}",
            scene.bubbles.len(),
            scene.base.width(),
            scene.base.height(),
        );
        scene
    }

    /// Spawn a bubble at `(x, y)` with a random radius, colour and
    /// velocity. The velocity can be overwritten afterwards through the
    /// returned id.
    pub fn add_bubble(&mut self, x: f32, y: f32) -> ObjectId {
        let radius = self.rng.range(self.config.radius_min, self.config.radius_max);
        let max = self.config.max_speed;
        let velocity = Vec2::new(self.rng.range(-max, max), self.rng.range(-max, max)) * self.speed;
        let color = shape_color(self.rng.index(SHAPE_COLORS.len()));

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let bubble = Bubble::new(
            id,
            &mut self.world,
            &mut self.base.graph,
            self.base.camera,
            Vec2::new(x, y),
            radius,
            velocity,
            color,
        );
        self.bubbles.push(bubble);
        log::debug!("{}: bubble {} at ({x:.1}, {y:.1}) r={radius:.1}", self.base.id, id.0);
        id
    }

    /// Destroy a bubble: its mesh, material and body. Unknown ids are ignored.
    pub fn remove_bubble(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.bubbles.iter().position(|b| b.id == id) else {
            return false;
        };
        let bubble = self.bubbles.remove(index);
        bubble.dispose(&mut self.world, &mut self.base.graph)
    }

    pub fn bubbles(&self) -> Vec<BubbleState> {
        self.bubbles
            .iter()
            .filter_map(|b| b.state(&self.world, self.base.camera))
            .collect()
    }

    pub fn bubble(&self, id: ObjectId) -> Option<BubbleState> {
        self.bubbles
            .iter()
            .find(|b| b.id == id)
            .and_then(|b| b.state(&self.world, self.base.camera))
    }

    pub fn set_bubble_velocity(&mut self, id: ObjectId, velocity: Vec2) -> bool {
        match self.bubbles.iter().find(|b| b.id == id) {
            Some(bubble) => {
                bubble.set_velocity(&mut self.world, self.base.camera, velocity);
                true
            }
            None => false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    fn layout_walls(&mut self) {
        let (w, h) = (self.base.width(), self.base.height());
        let size = Vec2::new(WALL_THICKNESS, h);
        let camera = self.base.camera;
        let graph = &mut self.base.graph;

        self.wall_left.set_position(&mut self.world, graph, camera, Vec2::new(-WALL_THICKNESS / 2.0, h / 2.0));
        self.wall_left.set_size(&mut self.world, graph, size);
        self.wall_right.set_position(&mut self.world, graph, camera, Vec2::new(w + WALL_THICKNESS / 2.0, h / 2.0));
        self.wall_right.set_size(&mut self.world, graph, size);
    }
}

impl Scenario for SceneBouncingBubbles {
    fn base(&self) -> &Scene3D {
        &self.base
    }

    fn update(&mut self, ctx: &mut GlobalContext, dt: f32) {
        for (name, value) in ctx.debug.take_changed(&self.base.id) {
            if name == "speed" {
                self.speed = value;
            }
        }

        self.runner.run(&mut self.world, dt);
        for bubble in &self.bubbles {
            bubble.sync(&self.world, &mut self.base.graph, self.base.camera);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.base.resize(width, height);
        self.layout_walls();
    }

    fn object_count(&self) -> usize {
        self.bubbles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;
    const H: f32 = 300.0;

    fn config(count: usize) -> StageConfig {
        let mut config = StageConfig::default();
        config.bubbles.count = count;
        config
    }

    fn scene(count: usize) -> (SceneBouncingBubbles, GlobalContext) {
        let mut ctx = GlobalContext::new(false, 42);
        let scene = SceneBouncingBubbles::new("bubbles", W, H, &config(count), &mut ctx);
        (scene, ctx)
    }

    #[test]
    fn test_initial_population_inside_canvas() {
        let (scene, _) = scene(10);
        let bubbles = scene.bubbles();
        assert_eq!(bubbles.len(), 10);
        for b in bubbles {
            assert!((0.0..=W).contains(&b.position.x) && (0.0..=H).contains(&b.position.y), "{b:?}");
            assert!((10.0..=30.0).contains(&b.radius));
            assert!(b.velocity.x.abs() <= 150.0 && b.velocity.y.abs() <= 150.0);
        }
    }

    #[test]
    fn test_remove_releases_exactly_one_object() {
        let (mut scene, _) = scene(3);
        let bodies = scene.world.body_count();
        let meshes = scene.base.graph.mesh_count();
        let materials = scene.base.graph.material_count();

        let id = scene.bubbles()[1].id;
        assert!(scene.remove_bubble(id));
        assert_eq!(scene.world.body_count(), bodies - 1);
        assert_eq!(scene.base.graph.mesh_count(), meshes - 1);
        assert_eq!(scene.base.graph.material_count(), materials - 1);
        assert_eq!(scene.object_count(), 2);
        assert!(scene.bubble(id).is_none());

        assert!(!scene.remove_bubble(id));
        assert_eq!(scene.world.body_count(), bodies - 1);
    }

    #[test]
    fn test_add_bubble_at_requested_position() {
        let (mut scene, _) = scene(0);
        let id = scene.add_bubble(120.0, -5.0);
        let b = scene.bubble(id).unwrap();
        assert_eq!(b.position, Vec2::new(120.0, -5.0));
    }

    #[test]
    fn test_set_velocity() {
        let (mut scene, _) = scene(0);
        let id = scene.add_bubble(100.0, 100.0);
        assert!(scene.set_bubble_velocity(id, Vec2::new(12.0, -34.0)));
        assert_eq!(scene.bubble(id).unwrap().velocity, Vec2::new(12.0, -34.0));
        assert!(!scene.set_bubble_velocity(ObjectId(999), Vec2::ZERO));
    }

    #[test]
    fn test_no_gravity_in_bubbles_scene() {
        let (mut scene, mut ctx) = scene(0);
        let id = scene.add_bubble(200.0, 150.0);
        scene.set_bubble_velocity(id, Vec2::ZERO);
        for _ in 0..30 {
            scene.update(&mut ctx, 1.0 / 60.0);
        }
        let b = scene.bubble(id).unwrap();
        assert!((b.position - Vec2::new(200.0, 150.0)).length() < 1e-3, "{b:?}");
    }

    #[test]
    fn test_bounces_off_right_wall() {
        let (mut scene, mut ctx) = scene(0);
        let id = scene.add_bubble(W - 60.0, H / 2.0);
        scene.set_bubble_velocity(id, Vec2::new(300.0, 0.0));
        for _ in 0..60 {
            scene.update(&mut ctx, 1.0 / 60.0);
        }
        let b = scene.bubble(id).unwrap();
        assert!(b.position.x < W, "escaped: {b:?}");
        assert!(b.velocity.x < 0.0, "did not bounce: {b:?}");
    }

    #[test]
    fn test_mesh_follows_body_after_update() {
        let (mut scene, mut ctx) = scene(4);
        scene.update(&mut ctx, 0.1);
        let instances = scene.base.instances();
        // walls are hidden, so instances are the bubbles in creation order
        for (b, inst) in scene.bubbles().iter().zip(instances) {
            assert_eq!([b.position.x, b.position.y], [inst.center[0], inst.center[1]]);
        }
    }

    #[test]
    fn test_speed_param_scales_new_bubbles() {
        let (mut scene, mut ctx) = scene(0);
        ctx.debug.set("bubbles/speed", 0.0).unwrap();
        scene.update(&mut ctx, 0.0);
        assert_eq!(scene.speed(), 0.0);
        let id = scene.add_bubble(100.0, 100.0);
        assert_eq!(scene.bubble(id).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_resize_moves_right_wall() {
        let (mut scene, _) = scene(0);
        scene.resize(800.0, 600.0);
        assert_eq!(scene.width(), 800.0);
        let p = scene.world.position(scene.wall_right.body()).unwrap();
        assert_eq!(p, Vec2::new(800.0 + WALL_THICKNESS / 2.0, 300.0));
        assert_eq!(scene.wall_right.size(), Vec2::new(WALL_THICKNESS, 600.0));
    }
}
