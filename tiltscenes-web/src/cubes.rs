use glam::Vec2;
use tiltscenes_gpu_shared::palette::{named, shape_color, SHAPE_COLORS};

use crate::config::{CubesConfig, StageConfig};
use crate::context::GlobalContext;
use crate::entities::{CubeState, GravityCube, ObjectId, Wall};
use crate::orientation::format_gravity;
use crate::physics::{PhysicsWorld, Runner};
use crate::rng::Rng;
use crate::scene::{CameraKind, Scenario, Scene3D};

const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Cubes falling onto two ledges, with gravity that follows the device
/// tilt. Mesh coordinates are centred with y up.
pub struct SceneGravityCubes {
    base: Scene3D,
    world: PhysicsWorld,
    runner: Runner,
    rng: Rng,
    config: CubesConfig,
    /// px/s² of a unit gravity component before `gScale`.
    gravity_base: f32,
    wall_right: Wall,
    wall_left: Wall,
    surface1: Wall,
    surface2: Wall,
    cubes: Vec<GravityCube>,
    next_id: u64,
}

impl SceneGravityCubes {
    pub fn new(id: &str, width: f32, height: f32, config: &StageConfig, ctx: &mut GlobalContext) -> Self {
        let mut base = Scene3D::new(id, width, height, CameraKind::Centered);
        let g_scale = ctx.debug.add(id, "gScale", config.cubes.gravity_scale, 0.5, 10.0, Some(0.1));
        let gravity_base = config.physics.gravity;

        let mut world = PhysicsWorld::new(gravity_base * g_scale, config.physics.length_unit);
        world.set_gravity(Vec2::new(0.0, 1.0));

        let blue = named("blue").unwrap_or(BLUE);
        let green = named("green").unwrap_or(BLUE);
        let graph = &mut base.graph;
        let wall_right = Wall::new(&mut world, graph, Some(blue), 0.0);
        let wall_left = Wall::new(&mut world, graph, Some(blue), 0.0);
        let surface1 = Wall::new(&mut world, graph, Some(green), 0.0);
        let surface2 = Wall::new(&mut world, graph, Some(blue), 0.0);

        let mut scene = Self {
            base,
            world,
            runner: Runner::new(config.physics.timestep, config.physics.max_substeps),
            rng: ctx.rng.fork(),
            config: config.cubes.clone(),
            gravity_base,
            wall_right,
            wall_left,
            surface1,
            surface2,
            cubes: Vec::new(),
            next_id: 0,
        };
        scene.layout_walls();

        let (w, h) = (scene.base.width(), scene.base.height());
        for i in 0..scene.config.count {
            let x = scene.rng.range(-w / 2.0, w / 2.0);
            let y = scene.rng.range(-h / 2.0, h / 2.0);
            scene.spawn(Vec2::new(x, y), shape_color(i));
        }

        ctx.use_device_orientation = true;
        log::info!("Scene {id}: {} cubes in {w}x{h}, gScale {g_scale}", scene.cubes.len());
        scene
    }

    /// Drop a new cube at `(x, y)` in mesh coordinates, at rest.
    pub fn add_cube(&mut self, x: f32, y: f32) -> ObjectId {
        let color = shape_color(self.rng.index(SHAPE_COLORS.len()));
        self.spawn(Vec2::new(x, y), color)
    }

    fn spawn(&mut self, position: Vec2, color: [f32; 4]) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let cube = GravityCube::new(
            id,
            &mut self.world,
            &mut self.base.graph,
            self.base.camera,
            position,
            self.config.size,
            color,
            self.config.restitution,
        );
        self.cubes.push(cube);
        log::debug!("{}: cube {} at ({:.1}, {:.1})", self.base.id, id.0, position.x, position.y);
        id
    }

    /// Destroy a cube: its mesh, material and body. Unknown ids are ignored.
    pub fn remove_cube(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.cubes.iter().position(|c| c.id == id) else {
            return false;
        };
        let cube = self.cubes.remove(index);
        cube.dispose(&mut self.world, &mut self.base.graph)
    }

    pub fn cubes(&self) -> Vec<CubeState> {
        self.cubes
            .iter()
            .filter_map(|c| c.state(&self.world, self.base.camera))
            .collect()
    }

    pub fn cube(&self, id: ObjectId) -> Option<CubeState> {
        self.cubes
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.state(&self.world, self.base.camera))
    }

    /// Gravity direction, engine frame (y down).
    pub fn gravity(&self) -> Vec2 {
        self.world.gravity()
    }

    /// Acceleration of a unit gravity component, px/s².
    pub fn gravity_scale(&self) -> f32 {
        self.world.gravity_scale()
    }

    fn layout_walls(&mut self) {
        let (w, h) = (self.base.width(), self.base.height());
        let t = self.config.wall_thickness;
        let camera = self.base.camera;
        let graph = &mut self.base.graph;
        let world = &mut self.world;

        self.wall_right.set_position(world, graph, camera, Vec2::new(w / 2.0 + t, 0.0));
        self.wall_right.set_size(world, graph, Vec2::new(t, h));

        self.wall_left.set_position(world, graph, camera, Vec2::new(-w / 2.0 - t, 0.0));
        self.wall_left.set_size(world, graph, Vec2::new(t, h));

        self.surface1.set_position(world, graph, camera, Vec2::new(-w / 7.0, h / 6.0));
        self.surface1.set_size(world, graph, Vec2::new(w / 1.4, t));

        self.surface2.set_position(world, graph, camera, Vec2::new(w / 7.0, -h / 6.0));
        self.surface2.set_size(world, graph, Vec2::new(w / 1.4, t));
    }
}

impl Scenario for SceneGravityCubes {
    fn base(&self) -> &Scene3D {
        &self.base
    }

    fn update(&mut self, ctx: &mut GlobalContext, dt: f32) {
        for (name, value) in ctx.debug.take_changed(&self.base.id) {
            if name == "gScale" {
                self.world.set_gravity_scale(self.gravity_base * value);
            }
        }

        self.runner.run(&mut self.world, dt);
        for cube in &self.cubes {
            cube.sync(&self.world, &mut self.base.graph, self.base.camera);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.base.resize(width, height);
        self.layout_walls();
    }

    /// Tilt becomes the gravity direction, each axis clamped to `[-1, 1]`.
    fn on_device_orientation(&mut self, ctx: &mut GlobalContext) {
        let gravity = ctx.orientation.tilt_gravity();
        ctx.debug.dom_debug = format_gravity(gravity);
        self.world.set_gravity(gravity);
    }

    fn object_count(&self) -> usize {
        self.cubes.len()
    }
}
