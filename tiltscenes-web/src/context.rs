use crate::debug::DebugUi;
use crate::orientation::{DeviceOrientation, MotionPermission};
use crate::rng::Rng;
use crate::time::Time;

/// Process-wide state shared by every scene.
///
/// There is exactly one per stage. Scenes receive it by `&mut` during
/// construction and updates instead of reaching for a global.
pub struct GlobalContext {
    pub time: Time,
    pub debug: DebugUi,
    /// Last orientation reading from the device.
    pub orientation: DeviceOrientation,
    /// Set by scenes that react to orientation; the stage only forwards
    /// events to scenes while this is on.
    pub use_device_orientation: bool,
    pub motion_permission: MotionPermission,
    pub rng: Rng,
}

impl GlobalContext {
    pub fn new(debug_active: bool, seed: u64) -> Self {
        Self {
            time: Time::new(),
            debug: DebugUi::new(debug_active),
            orientation: DeviceOrientation::default(),
            use_device_orientation: false,
            motion_permission: MotionPermission::Unknown,
            rng: Rng::new(seed),
        }
    }

    pub fn set_motion_permission(&mut self, permission: MotionPermission) {
        if self.motion_permission != permission {
            log::info!("Motion permission: {}", permission.label());
            self.motion_permission = permission;
        }
    }

    /// Whether an incoming orientation event should reach the scenes.
    pub fn accepts_orientation(&self) -> bool {
        self.use_device_orientation && self.motion_permission.allows_events()
    }
}
