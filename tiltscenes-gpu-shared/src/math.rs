use glam::{Mat4, Vec3};

/// Default near/far planes for scene cameras (matches a camera parked at z = 1000).
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
pub const CAMERA_Z: f32 = 1000.0;

/// Orthographic projection centred on the origin, y up.
/// Visible area is `[-w/2, w/2] x [-h/2, h/2]`.
pub fn centered_ortho(width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh(-width / 2.0, width / 2.0, -height / 2.0, height / 2.0, near, far)
}

/// Orthographic projection in screen space: origin top-left, y down.
pub fn screen_ortho(width: f32, height: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width, height, 0.0, near, far)
}

/// View matrix for a camera at `(0, 0, z)` looking down -z.
pub fn camera_view(z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -z))
}

/// sRGB component to linear, for colours picked by name or hex.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn to_ndc(vp: &Mat4, p: Vec3) -> Vec3 {
        let clip = *vp * p.extend(1.0);
        clip.truncate() / clip.w
    }

    // ── centered_ortho ──

    #[test]
    fn test_centered_corners_map_to_ndc_corners() {
        let vp = centered_ortho(800.0, 600.0, CAMERA_NEAR, CAMERA_FAR) * camera_view(CAMERA_Z);
        let tr = to_ndc(&vp, Vec3::new(400.0, 300.0, 0.0));
        assert!(approx_eq(tr.x, 1.0) && approx_eq(tr.y, 1.0), "top-right -> {tr}");
        let bl = to_ndc(&vp, Vec3::new(-400.0, -300.0, 0.0));
        assert!(approx_eq(bl.x, -1.0) && approx_eq(bl.y, -1.0), "bottom-left -> {bl}");
    }

    #[test]
    fn test_centered_origin_inside_depth_range() {
        let vp = centered_ortho(800.0, 600.0, CAMERA_NEAR, CAMERA_FAR) * camera_view(CAMERA_Z);
        let o = to_ndc(&vp, Vec3::ZERO);
        assert!(o.z > 0.0 && o.z < 1.0, "depth {} outside [0, 1]", o.z);
    }

    // ── screen_ortho ──

    #[test]
    fn test_screen_origin_is_top_left() {
        let vp = screen_ortho(800.0, 600.0, CAMERA_NEAR, CAMERA_FAR) * camera_view(CAMERA_Z);
        let tl = to_ndc(&vp, Vec3::ZERO);
        assert!(approx_eq(tl.x, -1.0) && approx_eq(tl.y, 1.0), "top-left -> {tl}");
        let br = to_ndc(&vp, Vec3::new(800.0, 600.0, 0.0));
        assert!(approx_eq(br.x, 1.0) && approx_eq(br.y, -1.0), "bottom-right -> {br}");
    }

    // ── srgb_to_linear ──

    #[test]
    fn test_srgb_endpoints() {
        assert!(approx_eq(srgb_to_linear(0.0), 0.0));
        assert!(approx_eq(srgb_to_linear(1.0), 1.0));
    }

    #[test]
    fn test_srgb_midtone_darkens() {
        let mid = srgb_to_linear(0.5);
        assert!(mid > 0.2 && mid < 0.22, "0.5 sRGB -> {mid}");
    }
}
