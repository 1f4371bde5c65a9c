use glam::Vec2;

/// Last `deviceorientation` reading, in degrees. Browsers report `null`
/// for sensors they do not have; those arrive here as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceOrientation {
    /// Rotation around z, `[0, 360)`.
    pub alpha: f32,
    /// Front-back tilt, `[-180, 180)`.
    pub beta: f32,
    /// Left-right tilt, `[-90, 90)`.
    pub gamma: f32,
}

impl DeviceOrientation {
    pub fn new(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> Self {
        let deg = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0) as f32;
        Self {
            alpha: deg(alpha),
            beta: deg(beta),
            gamma: deg(gamma),
        }
    }

    /// Gravity direction from tilt: `gamma` drives x, `beta` drives y, each
    /// divided by 90° and clamped to `[-1, 1]`.
    pub fn tilt_gravity(&self) -> Vec2 {
        Vec2::new(
            (self.gamma / 90.0).clamp(-1.0, 1.0),
            (self.beta / 90.0).clamp(-1.0, 1.0),
        )
    }
}

/// Text shown in the debug line when gravity follows the device.
pub fn format_gravity(g: Vec2) -> String {
    format!("{:.2}, {:.2}", g.x, g.y)
}

/// State of the motion-sensor permission. Only iOS Safari gates the
/// orientation events behind an explicit, gesture-triggered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPermission {
    #[default]
    Unknown,
    /// The browser has no permission API; events flow freely.
    NotRequired,
    Granted,
    Denied,
}

impl MotionPermission {
    /// Map the string resolved by `DeviceOrientationEvent.requestPermission()`.
    pub fn from_response(response: &str) -> Self {
        match response {
            "granted" => Self::Granted,
            "not-required" => Self::NotRequired,
            _ => Self::Denied,
        }
    }

    pub fn allows_events(&self) -> bool {
        !matches!(self, Self::Denied)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::NotRequired => "not-required",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_device_has_no_tilt() {
        let o = DeviceOrientation::new(Some(120.0), Some(0.0), Some(0.0));
        assert_eq!(o.tilt_gravity(), Vec2::ZERO);
    }

    #[test]
    fn test_tilt_is_normalised() {
        let o = DeviceOrientation::new(None, Some(45.0), Some(-30.0));
        let g = o.tilt_gravity();
        assert!((g.x + 1.0 / 3.0).abs() < 1e-6);
        assert!((g.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_always_within_unit_range() {
        let mut angle = -720.0;
        while angle <= 720.0 {
            let o = DeviceOrientation::new(Some(0.0), Some(angle), Some(-angle));
            let g = o.tilt_gravity();
            assert!((-1.0..=1.0).contains(&g.x), "gx {} for {angle}", g.x);
            assert!((-1.0..=1.0).contains(&g.y), "gy {} for {angle}", g.y);
            angle += 7.5;
        }
    }

    #[test]
    fn test_missing_and_nan_angles_are_zero() {
        let o = DeviceOrientation::new(None, Some(f64::NAN), None);
        assert_eq!(o, DeviceOrientation::default());
    }

    #[test]
    fn test_format_gravity() {
        assert_eq!(format_gravity(Vec2::new(0.5, -1.0)), "0.50, -1.00");
    }

    #[test]
    fn test_permission_from_response() {
        assert_eq!(MotionPermission::from_response("granted"), MotionPermission::Granted);
        assert_eq!(MotionPermission::from_response("denied"), MotionPermission::Denied);
        assert_eq!(MotionPermission::from_response("garbage"), MotionPermission::Denied);
        assert!(MotionPermission::Unknown.allows_events());
        assert!(!MotionPermission::Denied.allows_events());
    }
}
