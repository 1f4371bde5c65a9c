//! Scene objects: a mesh in the scene graph paired with a body in the
//! scene's physics world. The two are only ever created and destroyed
//! together.

use glam::Vec2;
use tiltscenes_gpu_shared::palette::Rgba;

use crate::physics::{BodyDesc, BodyHandle, BodyShape, PhysicsWorld};
use crate::scene::CameraKind;
use crate::scene_graph::{Geometry, MeshHandle, SceneGraph};

/// Identifies a bubble or cube within its scene. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

#[derive(Debug, Clone, Copy)]
pub struct Pairing {
    pub mesh: MeshHandle,
    pub body: BodyHandle,
}

impl Pairing {
    /// Copy the body's pose onto the mesh.
    pub fn sync(&self, world: &PhysicsWorld, graph: &mut SceneGraph, camera: CameraKind) {
        if let (Some(position), Some(angle)) = (world.position(self.body), world.angle(self.body)) {
            graph.set_transform(self.mesh, camera.to_mesh(position), camera.angle_to_mesh(angle));
        }
    }

    /// Release both halves. Returns `true` only if both were still alive.
    pub fn dispose(self, world: &mut PhysicsWorld, graph: &mut SceneGraph) -> bool {
        let mesh_gone = graph.dispose(self.mesh);
        let body_gone = world.remove_body(self.body);
        mesh_gone && body_gone
    }
}

/// Static box. Invisible walls still have a mesh so resizing and disposal
/// work the same way for every wall.
pub struct Wall {
    pairing: Pairing,
    size: Vec2,
}

impl Wall {
    pub fn new(
        world: &mut PhysicsWorld,
        graph: &mut SceneGraph,
        color: Option<Rgba>,
        restitution: f32,
    ) -> Self {
        let size = Vec2::ONE;
        let body = world.add_body(
            BodyDesc::fixed(BodyShape::Cuboid { half_extents: size / 2.0 }, Vec2::ZERO)
                .with_restitution(restitution)
                .with_friction(0.0),
        );
        let mesh = graph.add_mesh(
            Geometry::Box { width: size.x, height: size.y },
            color.unwrap_or([0.0; 4]),
        );
        graph.set_visible(mesh, color.is_some());
        Self {
            pairing: Pairing { mesh, body },
            size,
        }
    }

    /// Centre of the wall, in mesh coordinates.
    pub fn set_position(&self, world: &mut PhysicsWorld, graph: &mut SceneGraph, camera: CameraKind, position: Vec2) {
        world.set_position(self.pairing.body, camera.to_body(position));
        graph.set_transform(self.pairing.mesh, position, 0.0);
    }

    pub fn set_size(&mut self, world: &mut PhysicsWorld, graph: &mut SceneGraph, size: Vec2) {
        self.size = size;
        world.resize_cuboid(self.pairing.body, size / 2.0);
        graph.set_geometry(self.pairing.mesh, Geometry::Box { width: size.x, height: size.y });
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn body(&self) -> BodyHandle {
        self.pairing.body
    }
}

/// A falling cube in the gravity scene.
pub struct GravityCube {
    pub id: ObjectId,
    pairing: Pairing,
    size: f32,
}

impl GravityCube {
    /// Create a cube centred on `position` (mesh coordinates), at rest.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ObjectId,
        world: &mut PhysicsWorld,
        graph: &mut SceneGraph,
        camera: CameraKind,
        position: Vec2,
        size: f32,
        color: Rgba,
        restitution: f32,
    ) -> Self {
        let body = world.add_body(
            BodyDesc::dynamic(
                BodyShape::Cuboid { half_extents: Vec2::splat(size / 2.0) },
                camera.to_body(position),
            )
            .with_restitution(restitution),
        );
        let mesh = graph.add_mesh(Geometry::Box { width: size, height: size }, color);
        let pairing = Pairing { mesh, body };
        pairing.sync(world, graph, camera);
        Self { id, pairing, size }
    }

    pub fn state(&self, world: &PhysicsWorld, camera: CameraKind) -> Option<CubeState> {
        Some(CubeState {
            id: self.id,
            position: camera.to_mesh(world.position(self.pairing.body)?),
            velocity: camera.to_mesh(world.velocity(self.pairing.body)?),
            angle: camera.angle_to_mesh(world.angle(self.pairing.body)?),
            size: self.size,
        })
    }

    pub fn sync(&self, world: &PhysicsWorld, graph: &mut SceneGraph, camera: CameraKind) {
        self.pairing.sync(world, graph, camera);
    }

    pub fn dispose(self, world: &mut PhysicsWorld, graph: &mut SceneGraph) -> bool {
        self.pairing.dispose(world, graph)
    }
}

/// A bouncing disc in a bubbles scene.
pub struct Bubble {
    pub id: ObjectId,
    pairing: Pairing,
    radius: f32,
}

impl Bubble {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ObjectId,
        world: &mut PhysicsWorld,
        graph: &mut SceneGraph,
        camera: CameraKind,
        position: Vec2,
        radius: f32,
        velocity: Vec2,
        color: Rgba,
    ) -> Self {
        let body = world.add_body(
            BodyDesc::dynamic(BodyShape::Ball { radius }, camera.to_body(position))
                .with_velocity(camera.to_body(velocity))
                .with_restitution(1.0)
                .with_friction(0.0),
        );
        let mesh = graph.add_mesh(Geometry::Circle { radius }, color);
        let pairing = Pairing { mesh, body };
        pairing.sync(world, graph, camera);
        Self { id, pairing, radius }
    }

    pub fn state(&self, world: &PhysicsWorld, camera: CameraKind) -> Option<BubbleState> {
        Some(BubbleState {
            id: self.id,
            position: camera.to_mesh(world.position(self.pairing.body)?),
            velocity: camera.to_mesh(world.velocity(self.pairing.body)?),
            radius: self.radius,
        })
    }

    pub fn set_velocity(&self, world: &mut PhysicsWorld, camera: CameraKind, velocity: Vec2) {
        world.set_velocity(self.pairing.body, camera.to_body(velocity));
    }

    pub fn sync(&self, world: &PhysicsWorld, graph: &mut SceneGraph, camera: CameraKind) {
        self.pairing.sync(world, graph, camera);
    }

    pub fn dispose(self, world: &mut PhysicsWorld, graph: &mut SceneGraph) -> bool {
        self.pairing.dispose(world, graph)
    }
}

/// Snapshot of a bubble, in its scene's mesh coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleState {
    pub id: ObjectId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// Snapshot of a cube, in its scene's mesh coordinates (centred, y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeState {
    pub id: ObjectId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = [1.0; 4];

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(1000.0, 100.0)
    }

    #[test]
    fn test_cube_mesh_matches_flipped_body() {
        let mut world = world();
        let mut graph = SceneGraph::new();
        let cam = CameraKind::Centered;
        let cube = GravityCube::new(ObjectId(1), &mut world, &mut graph, cam, Vec2::new(10.0, 20.0), 40.0, WHITE, 0.3);

        assert_eq!(world.position(cube.pairing.body), Some(Vec2::new(10.0, -20.0)));
        let mesh = graph.mesh(cube.pairing.mesh).unwrap();
        assert_eq!((mesh.position.x, mesh.position.y), (10.0, 20.0));
        assert_eq!(cube.state(&world, cam).unwrap().position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_bubble_velocity_round_trips_through_camera() {
        let mut world = world();
        let mut graph = SceneGraph::new();
        let cam = CameraKind::Screen;
        let bubble = Bubble::new(ObjectId(1), &mut world, &mut graph, cam, Vec2::new(5.0, 5.0), 10.0, Vec2::new(30.0, -40.0), WHITE);
        assert_eq!(bubble.state(&world, cam).unwrap().velocity, Vec2::new(30.0, -40.0));
        bubble.set_velocity(&mut world, cam, Vec2::new(1.0, 2.0));
        assert_eq!(bubble.state(&world, cam).unwrap().velocity, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_dispose_releases_one_of_each() {
        let mut world = world();
        let mut graph = SceneGraph::new();
        let cam = CameraKind::Screen;
        let a = Bubble::new(ObjectId(1), &mut world, &mut graph, cam, Vec2::ZERO, 10.0, Vec2::ZERO, WHITE);
        let _b = Bubble::new(ObjectId(2), &mut world, &mut graph, cam, Vec2::new(100.0, 0.0), 10.0, Vec2::ZERO, WHITE);

        assert!(a.dispose(&mut world, &mut graph));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);
        assert_eq!(graph.mesh_count(), 1);
        assert_eq!(graph.material_count(), 1);
    }

    #[test]
    fn test_invisible_wall_is_not_drawn() {
        let mut world = world();
        let mut graph = SceneGraph::new();
        let mut wall = Wall::new(&mut world, &mut graph, None, 1.0);
        wall.set_size(&mut world, &mut graph, Vec2::new(10.0, 300.0));
        assert_eq!(wall.size(), Vec2::new(10.0, 300.0));
        assert_eq!(graph.mesh_count(), 1);
        assert!(graph.instances().is_empty());
    }

    #[test]
    fn test_wall_position_in_mesh_coordinates() {
        let mut world = world();
        let mut graph = SceneGraph::new();
        let wall = Wall::new(&mut world, &mut graph, Some(WHITE), 0.0);
        wall.set_position(&mut world, &mut graph, CameraKind::Centered, Vec2::new(-30.0, 50.0));
        assert_eq!(world.position(wall.body()), Some(Vec2::new(-30.0, -50.0)));
        assert_eq!(graph.instances()[0].center, [-30.0, 50.0, 0.0]);
    }
}
