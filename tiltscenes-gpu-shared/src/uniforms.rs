use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-frame uniforms: one orthographic view-projection per canvas.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// How the fragment shader fills an instance's quad.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect = 0,
    Disc = 1,
}

/// One shape on screen. Laid out to match `InstanceIn` in `shapes.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub center: [f32; 3],
    pub rotation: f32,
    pub half_size: [f32; 2],
    pub kind: u32,
    pub _pad: u32,
    pub color: [f32; 4],
}

impl ShapeInstance {
    pub fn new(kind: ShapeKind, center: [f32; 3], half_size: [f32; 2], rotation: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            rotation,
            half_size,
            kind: kind as u32,
            _pad: 0,
            color,
        }
    }

    /// Byte offsets of each attribute, in shader location order.
    pub const ATTRIBUTE_OFFSETS: [u64; 5] = [0, 12, 16, 24, 32];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 48);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 64);
    }

    #[test]
    fn test_attribute_offsets_match_layout() {
        let inst = ShapeInstance::new(ShapeKind::Disc, [1.0, 2.0, 3.0], [4.0, 5.0], 6.0, [7.0, 8.0, 9.0, 10.0]);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        let read_f32 = |offset: usize| f32::from_ne_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let offsets = ShapeInstance::ATTRIBUTE_OFFSETS;
        assert_eq!(read_f32(offsets[0] as usize), 1.0);
        assert_eq!(read_f32(offsets[1] as usize), 6.0);
        assert_eq!(read_f32(offsets[2] as usize), 4.0);
        assert_eq!(u32::from_ne_bytes(bytes[24..28].try_into().unwrap()), ShapeKind::Disc as u32);
        assert_eq!(read_f32(offsets[4] as usize), 7.0);
    }

    #[test]
    fn test_frame_uniforms_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 5.0));
        let u = FrameUniforms::new(m);
        assert_eq!(u.view_proj[3][0], 3.0);
        assert_eq!(u.view_proj[3][1], 4.0);
        assert_eq!(u.view_proj[3][2], 5.0);
    }
}
