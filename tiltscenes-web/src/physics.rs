//! Thin wrapper over a `rapier2d` world.
//!
//! Scenes talk to the engine only through [`PhysicsWorld`], in pixels and
//! seconds with `glam` vectors. Gravity is kept as a direction with a
//! separate scale so the device tilt can be written straight into it.

use glam::Vec2;
use rapier2d::prelude::*;

pub type BodyHandle = RigidBodyHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Cuboid { half_extents: Vec2 },
    Ball { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Everything needed to insert one body with one collider.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub shape: BodyShape,
    pub position: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl BodyDesc {
    pub fn fixed(shape: BodyShape, position: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            shape,
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            restitution: 0.0,
            friction: 0.1,
            density: 1.0,
        }
    }

    pub fn dynamic(shape: BodyShape, position: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Self::fixed(shape, position)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// One rigid-body world, owned by one scene.
pub struct PhysicsWorld {
    gravity: Vec2,
    gravity_scale: f32,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Empty world with no gravity. `gravity_scale` is the acceleration in
    /// px/s² of a unit gravity component, `length_unit` the pixels per metre
    /// the engine should tune its tolerances for.
    pub fn new(gravity_scale: f32, length_unit: f32) -> Self {
        Self {
            gravity: Vec2::ZERO,
            gravity_scale,
            integration_parameters: IntegrationParameters {
                length_unit,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            // Sleeping bodies ignore gravity changes, and gravity follows the device.
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().can_sleep(false).ccd_enabled(true),
        };
        let body = builder
            .translation(vector![desc.position.x, desc.position.y])
            .rotation(desc.angle)
            .linvel(vector![desc.velocity.x, desc.velocity.y]);
        let handle = self.bodies.insert(body);

        let collider = match desc.shape {
            BodyShape::Cuboid { half_extents } => ColliderBuilder::cuboid(half_extents.x, half_extents.y),
            BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
        }
        .restitution(desc.restitution)
        .restitution_combine_rule(CoefficientCombineRule::Max)
        .friction(desc.friction)
        .density(desc.density);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    /// Remove a body and its colliders. Returns `false` for unknown handles.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| {
            let t = b.translation();
            Vec2::new(t.x, t.y)
        })
    }

    pub fn angle(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|b| b.rotation().angle())
    }

    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| {
            let v = b.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    /// Replace the shape of every cuboid collider attached to `handle`.
    pub fn resize_cuboid(&mut self, handle: BodyHandle, half_extents: Vec2) -> bool {
        let Some(body) = self.bodies.get(handle) else {
            return false;
        };
        for collider_handle in body.colliders() {
            if let Some(collider) = self.colliders.get_mut(*collider_handle) {
                collider.set_shape(SharedShape::cuboid(half_extents.x, half_extents.y));
            }
        }
        true
    }

    /// Gravity direction, as written by the scene (not scaled).
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    /// Advance the world by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        let g = self.gravity * self.gravity_scale;
        self.physics_pipeline.step(
            &vector![g.x, g.y],
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

/// Fixed-timestep driver for one world. Frames hand it their real delta;
/// it runs as many whole steps as fit, up to `max_substeps`.
#[derive(Debug, Clone)]
pub struct Runner {
    timestep: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Runner {
    pub fn new(timestep: f32, max_substeps: u32) -> Self {
        Self {
            timestep,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of fixed steps owed for a frame of `dt` seconds. Backlog
    /// beyond the substep cap is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < self.max_substeps {
            self.accumulator -= self.timestep;
            steps += 1;
        }
        if self.accumulator >= self.timestep {
            log::debug!("Runner dropped {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn run(&mut self, world: &mut PhysicsWorld, dt: f32) -> u32 {
        let steps = self.advance(dt);
        for _ in 0..steps {
            world.step(self.timestep);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ball_world() -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new(1000.0, 100.0);
        let ball = world.add_body(BodyDesc::dynamic(BodyShape::Ball { radius: 10.0 }, Vec2::ZERO));
        (world, ball)
    }

    // ── PhysicsWorld ──

    #[test]
    fn test_no_gravity_keeps_velocity() {
        let (mut world, ball) = ball_world();
        world.set_velocity(ball, Vec2::new(120.0, -60.0));
        for _ in 0..30 {
            world.step(DT);
        }
        let p = world.position(ball).unwrap();
        assert!((p.x - 60.0).abs() < 1.0, "x = {}", p.x);
        assert!((p.y + 30.0).abs() < 1.0, "y = {}", p.y);
    }

    #[test]
    fn test_gravity_direction_is_scaled() {
        let (mut world, ball) = ball_world();
        world.set_gravity(Vec2::new(0.0, 1.0));
        for _ in 0..60 {
            world.step(DT);
        }
        let v = world.velocity(ball).unwrap();
        assert!((v.y - 1000.0).abs() < 20.0, "vy after 1s = {}", v.y);
        assert!(v.x.abs() < 1e-3);
    }

    #[test]
    fn test_remove_body_once() {
        let (mut world, ball) = ball_world();
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);
        assert!(world.remove_body(ball));
        assert!(!world.remove_body(ball));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert!(world.position(ball).is_none());
    }

    #[test]
    fn test_static_floor_stops_ball() {
        let (mut world, ball) = ball_world();
        world.set_gravity(Vec2::new(0.0, 1.0));
        world.add_body(BodyDesc::fixed(
            BodyShape::Cuboid { half_extents: Vec2::new(200.0, 5.0) },
            Vec2::new(0.0, 100.0),
        ));
        for _ in 0..240 {
            world.step(DT);
        }
        let p = world.position(ball).unwrap();
        assert!(p.y < 100.0, "ball fell through the floor: y = {}", p.y);
        assert!(p.y > 70.0, "ball never reached the floor: y = {}", p.y);
    }

    #[test]
    fn test_resize_cuboid() {
        let mut world = PhysicsWorld::new(1000.0, 100.0);
        let wall = world.add_body(BodyDesc::fixed(
            BodyShape::Cuboid { half_extents: Vec2::new(5.0, 5.0) },
            Vec2::ZERO,
        ));
        assert!(world.resize_cuboid(wall, Vec2::new(50.0, 5.0)));
        world.remove_body(wall);
        assert!(!world.resize_cuboid(wall, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_set_position() {
        let (mut world, ball) = ball_world();
        world.set_position(ball, Vec2::new(7.0, -3.0));
        assert_eq!(world.position(ball), Some(Vec2::new(7.0, -3.0)));
    }

    // ── Runner ──

    #[test]
    fn test_runner_accumulates() {
        let mut runner = Runner::new(0.01, 5);
        assert_eq!(runner.advance(0.004), 0);
        assert_eq!(runner.advance(0.004), 0);
        assert_eq!(runner.advance(0.004), 1);
    }

    #[test]
    fn test_runner_caps_substeps_and_drops_backlog() {
        let mut runner = Runner::new(0.01, 3);
        assert_eq!(runner.advance(1.0), 3);
        assert_eq!(runner.advance(0.0), 0);
    }

    #[test]
    fn test_runner_steps_world() {
        let (mut world, ball) = ball_world();
        world.set_velocity(ball, Vec2::new(60.0, 0.0));
        let mut runner = Runner::new(DT, 5);
        assert_eq!(runner.run(&mut world, DT * 2.0 + 0.001), 2);
        let p = world.position(ball).unwrap();
        assert!((p.x - 2.0).abs() < 0.1, "x = {}", p.x);
    }
}
