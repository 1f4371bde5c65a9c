/// Delta reported for the very first frame (~60fps).
pub const FIRST_FRAME_DELTA_MS: f64 = 16.0;

/// Longest delta a frame may report. A tab coming back from the background
/// would otherwise feed the runners several seconds at once.
pub const MAX_DELTA_MS: f64 = 250.0;

/// Frame clock fed by `requestAnimationFrame` timestamps (milliseconds).
#[derive(Debug, Clone, Default)]
pub struct Time {
    pub start: Option<f64>,
    pub current: f64,
    pub elapsed: f64,
    pub delta: f64,
    pub frame: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms` and return the frame delta in milliseconds.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let start = *self.start.get_or_insert(now_ms);
        self.delta = if self.frame == 0 {
            FIRST_FRAME_DELTA_MS
        } else {
            (now_ms - self.current).clamp(0.0, MAX_DELTA_MS)
        };
        self.current = now_ms;
        self.elapsed = now_ms - start;
        self.frame += 1;
        self.delta
    }

    /// Frame delta in seconds, for the physics runners.
    pub fn delta_seconds(&self) -> f32 {
        (self.delta / 1000.0) as f32
    }
}
