use glam::{Mat4, Vec2};
use tiltscenes_gpu_shared::math::{camera_view, centered_ortho, screen_ortho, CAMERA_FAR, CAMERA_NEAR, CAMERA_Z};
use tiltscenes_gpu_shared::uniforms::{FrameUniforms, ShapeInstance};

use crate::context::GlobalContext;
use crate::scene_graph::SceneGraph;

/// How a scene's mesh coordinates relate to its physics coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    /// Origin top-left, y down. Mesh and body share coordinates.
    Screen,
    /// Origin at the canvas centre, y up. Bodies live in the engine's
    /// y-down frame, so y and angles flip between the two.
    Centered,
}

impl CameraKind {
    pub fn to_body(self, mesh: Vec2) -> Vec2 {
        match self {
            Self::Screen => mesh,
            Self::Centered => Vec2::new(mesh.x, -mesh.y),
        }
    }

    /// The flip is its own inverse; both directions go through here.
    pub fn to_mesh(self, body: Vec2) -> Vec2 {
        self.to_body(body)
    }

    pub fn angle_to_mesh(self, body_angle: f32) -> f32 {
        match self {
            Self::Screen => body_angle,
            Self::Centered => -body_angle,
        }
    }

    pub fn projection(self, width: f32, height: f32) -> Mat4 {
        match self {
            Self::Screen => screen_ortho(width, height, CAMERA_NEAR, CAMERA_FAR),
            Self::Centered => centered_ortho(width, height, CAMERA_NEAR, CAMERA_FAR),
        }
    }
}

/// Per-canvas state every scene has: size, camera and display list.
pub struct Scene3D {
    pub id: String,
    width: f32,
    height: f32,
    pub camera: CameraKind,
    pub graph: SceneGraph,
    pub clear_color: [f64; 4],
}

impl Scene3D {
    pub fn new(id: &str, width: f32, height: f32, camera: CameraKind) -> Self {
        Self {
            id: id.to_string(),
            width: width.max(1.0),
            height: height.max(1.0),
            camera,
            graph: SceneGraph::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn view_proj(&self) -> Mat4 {
        self.camera.projection(self.width, self.height) * camera_view(CAMERA_Z)
    }

    pub fn frame_uniforms(&self) -> FrameUniforms {
        FrameUniforms::new(self.view_proj())
    }

    pub fn instances(&self) -> Vec<ShapeInstance> {
        self.graph.instances()
    }
}

/// A scene the stage can drive.
pub trait Scenario {
    fn base(&self) -> &Scene3D;

    /// Advance physics by `dt` seconds and sync meshes to bodies.
    fn update(&mut self, ctx: &mut GlobalContext, dt: f32);

    fn resize(&mut self, width: f32, height: f32);

    /// Called with the latest reading already stored in `ctx.orientation`.
    fn on_device_orientation(&mut self, _ctx: &mut GlobalContext) {}

    /// Number of dynamic objects (bubbles or cubes) currently in the scene.
    fn object_count(&self) -> usize;

    fn width(&self) -> f32 {
        self.base().width()
    }

    fn height(&self) -> f32 {
        self.base().height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn to_ndc(vp: Mat4, p: Vec2) -> Vec2 {
        let clip = vp * Vec3::new(p.x, p.y, 0.0).extend(1.0);
        clip.truncate().truncate() / clip.w
    }

    #[test]
    fn test_centered_flips_y_and_angle() {
        let cam = CameraKind::Centered;
        assert_eq!(cam.to_body(Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
        assert_eq!(cam.to_mesh(cam.to_body(Vec2::new(3.0, 4.0))), Vec2::new(3.0, 4.0));
        assert_eq!(cam.angle_to_mesh(0.5), -0.5);
    }

    #[test]
    fn test_screen_is_identity() {
        let cam = CameraKind::Screen;
        assert_eq!(cam.to_body(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
        assert_eq!(cam.angle_to_mesh(0.5), 0.5);
    }

    #[test]
    fn test_screen_top_left_is_ndc_top_left() {
        let scene = Scene3D::new("s", 200.0, 100.0, CameraKind::Screen);
        let ndc = to_ndc(scene.view_proj(), Vec2::ZERO);
        assert!((ndc.x + 1.0).abs() < 1e-5 && (ndc.y - 1.0).abs() < 1e-5, "{ndc}");
    }

    #[test]
    fn test_resize_follows_canvas() {
        let mut scene = Scene3D::new("s", 200.0, 100.0, CameraKind::Centered);
        scene.resize(400.0, 300.0);
        assert_eq!((scene.width(), scene.height()), (400.0, 300.0));
        let ndc = to_ndc(scene.view_proj(), Vec2::new(200.0, 150.0));
        assert!((ndc.x - 1.0).abs() < 1e-5 && (ndc.y - 1.0).abs() < 1e-5, "{ndc}");
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let scene = Scene3D::new("s", 0.0, 0.0, CameraKind::Screen);
        assert_eq!((scene.width(), scene.height()), (1.0, 1.0));
    }
}
