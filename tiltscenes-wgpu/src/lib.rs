//! tiltscenes WebGPU/WebGL2 renderer.
//!
//! One [`ShapeRenderer`] per canvas. Scenes hand it a view-projection and a
//! flat list of shape instances each frame; it owns nothing else about them.

mod backend;

pub use backend::{grow_capacity, instance_buffer_layout, ShapeRenderer};

/// Errors raised while bringing up or presenting to a surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
    #[error("surface texture error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("surface was lost and has been reconfigured")]
    SurfaceReconfigured,
}
