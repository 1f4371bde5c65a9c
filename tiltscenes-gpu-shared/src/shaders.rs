/// Embedded WGSL shader source strings for the shape pipeline.
/// Shared between the renderer crate and anything that wants to validate them.

pub const SHAPES: &str = include_str!("../shaders/shapes.wgsl");

/// Vertices emitted per instance (two triangles, corners generated in the shader).
pub const VERTICES_PER_SHAPE: u32 = 6;
