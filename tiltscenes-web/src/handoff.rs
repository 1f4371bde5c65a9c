//! Where objects go when they leave a canvas.
//!
//! The three canvases are stacked and wrap around: 1 above 2 above 3, and
//! 3 above 1 again. Scenes 1 and 3 hold bubbles in screen coordinates;
//! scene 2 holds cubes in centred coordinates.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSlot {
    One,
    Two,
    Three,
}

impl SceneSlot {
    pub const ALL: [SceneSlot; 3] = [SceneSlot::One, SceneSlot::Two, SceneSlot::Three];

    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "scene 1",
            Self::Two => "scene 2",
            Self::Three => "scene 3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exit {
    Up,
    Down,
}

/// Boundary test for a bubble at screen `y`. On the edge is still inside.
pub fn bubble_exit(y: f32, height: f32) -> Option<Exit> {
    if y < 0.0 {
        Some(Exit::Up)
    } else if y > height {
        Some(Exit::Down)
    } else {
        None
    }
}

/// Boundary test for a cube at centred, y-up `y`.
pub fn cube_exit(y: f32, height: f32) -> Option<Exit> {
    if y > height / 2.0 {
        Some(Exit::Up)
    } else if y < -height / 2.0 {
        Some(Exit::Down)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub from: SceneSlot,
    pub exit: Exit,
    pub to: SceneSlot,
}

pub const ROUTES: [Route; 6] = [
    Route { from: SceneSlot::One, exit: Exit::Up, to: SceneSlot::Three },
    Route { from: SceneSlot::One, exit: Exit::Down, to: SceneSlot::Two },
    Route { from: SceneSlot::Two, exit: Exit::Up, to: SceneSlot::One },
    Route { from: SceneSlot::Two, exit: Exit::Down, to: SceneSlot::Three },
    Route { from: SceneSlot::Three, exit: Exit::Up, to: SceneSlot::Two },
    Route { from: SceneSlot::Three, exit: Exit::Down, to: SceneSlot::One },
];

impl Route {
    /// Position of this route in [`ROUTES`].
    pub fn index(&self) -> usize {
        let exit = match self.exit {
            Exit::Up => 0,
            Exit::Down => 1,
        };
        self.from.index() * 2 + exit
    }

    pub fn label(&self) -> String {
        let exit = match self.exit {
            Exit::Up => "up",
            Exit::Down => "down",
        };
        format!("{} {exit} -> {}", self.from.label(), self.to.label())
    }
}

pub fn route(from: SceneSlot, exit: Exit) -> Route {
    let key = Route { from, exit, to: from };
    ROUTES[key.index()]
}

/// Velocity of an arriving bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelocityRule {
    /// Keep the departing bubble's velocity.
    Inherit(Vec2),
    /// Keep the random velocity of the new bubble but point it up (`vy <= 0`).
    Upward,
    /// Keep the random velocity of the new bubble but point it down (`vy >= 0`).
    Downward,
}

impl VelocityRule {
    /// Resolve against the velocity the new bubble was spawned with.
    pub fn apply(self, spawned: Vec2) -> Vec2 {
        match self {
            Self::Inherit(v) => v,
            Self::Upward => Vec2::new(spawned.x, -spawned.y.abs()),
            Self::Downward => Vec2::new(spawned.x, spawned.y.abs()),
        }
    }
}

/// What to create in the target scene, in the target's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrival {
    Bubble { position: Vec2, velocity: VelocityRule },
    /// Cubes arrive at rest.
    Cube { position: Vec2 },
}

/// The object that replaces one which left along `route` at horizontal
/// position `x` with `velocity`. `target` is the target scene's size.
pub fn arrival(route: Route, x: f32, velocity: Vec2, target: Vec2) -> Arrival {
    let (w, h) = (target.x, target.y);
    match (route.from, route.exit) {
        (SceneSlot::One, Exit::Up) => Arrival::Bubble {
            position: Vec2::new(x, h),
            velocity: VelocityRule::Inherit(velocity),
        },
        (SceneSlot::One, Exit::Down) => Arrival::Cube {
            position: Vec2::new(x - w / 2.0, h / 2.0),
        },
        (SceneSlot::Two, Exit::Up) => Arrival::Bubble {
            position: Vec2::new(x + w / 2.0, h),
            velocity: VelocityRule::Upward,
        },
        (SceneSlot::Two, Exit::Down) => Arrival::Bubble {
            position: Vec2::new(x + w / 2.0, 0.0),
            velocity: VelocityRule::Downward,
        },
        (SceneSlot::Three, Exit::Up) => Arrival::Cube {
            position: Vec2::new(x - w / 2.0, -h / 2.0),
        },
        (SceneSlot::Three, Exit::Down) => Arrival::Bubble {
            position: Vec2::new(x, 0.0),
            velocity: VelocityRule::Inherit(velocity),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Vec2 = Vec2::new(800.0, 600.0);
    const V: Vec2 = Vec2::new(35.0, -120.0);

    // ── boundary tests ──

    #[test]
    fn test_bubble_exit_is_strict() {
        assert_eq!(bubble_exit(-0.1, 100.0), Some(Exit::Up));
        assert_eq!(bubble_exit(0.0, 100.0), None);
        assert_eq!(bubble_exit(100.0, 100.0), None);
        assert_eq!(bubble_exit(100.1, 100.0), Some(Exit::Down));
    }

    #[test]
    fn test_cube_exit_is_strict_and_y_up() {
        assert_eq!(cube_exit(50.1, 100.0), Some(Exit::Up));
        assert_eq!(cube_exit(50.0, 100.0), None);
        assert_eq!(cube_exit(-50.0, 100.0), None);
        assert_eq!(cube_exit(-50.1, 100.0), Some(Exit::Down));
    }

    // ── routes ──

    #[test]
    fn test_routes_wrap_around() {
        assert_eq!(route(SceneSlot::One, Exit::Up).to, SceneSlot::Three);
        assert_eq!(route(SceneSlot::One, Exit::Down).to, SceneSlot::Two);
        assert_eq!(route(SceneSlot::Two, Exit::Up).to, SceneSlot::One);
        assert_eq!(route(SceneSlot::Two, Exit::Down).to, SceneSlot::Three);
        assert_eq!(route(SceneSlot::Three, Exit::Up).to, SceneSlot::Two);
        assert_eq!(route(SceneSlot::Three, Exit::Down).to, SceneSlot::One);
    }

    #[test]
    fn test_route_index_matches_table() {
        for (i, r) in ROUTES.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn test_route_label() {
        assert_eq!(route(SceneSlot::Two, Exit::Down).label(), "scene 2 down -> scene 3");
    }

    // ── arrivals ──

    fn arrive(from: SceneSlot, exit: Exit, x: f32) -> Arrival {
        arrival(route(from, exit), x, V, TARGET)
    }

    #[test]
    fn test_one_up_enters_three_at_bottom_with_same_velocity() {
        assert_eq!(
            arrive(SceneSlot::One, Exit::Up, 120.0),
            Arrival::Bubble { position: Vec2::new(120.0, 600.0), velocity: VelocityRule::Inherit(V) }
        );
    }

    #[test]
    fn test_one_down_becomes_cube_at_top_of_two() {
        assert_eq!(
            arrive(SceneSlot::One, Exit::Down, 120.0),
            Arrival::Cube { position: Vec2::new(-280.0, 300.0) }
        );
    }

    #[test]
    fn test_two_up_enters_one_at_bottom_moving_up() {
        assert_eq!(
            arrive(SceneSlot::Two, Exit::Up, -100.0),
            Arrival::Bubble { position: Vec2::new(300.0, 600.0), velocity: VelocityRule::Upward }
        );
    }

    #[test]
    fn test_two_down_enters_three_at_top_moving_down() {
        assert_eq!(
            arrive(SceneSlot::Two, Exit::Down, 50.0),
            Arrival::Bubble { position: Vec2::new(450.0, 0.0), velocity: VelocityRule::Downward }
        );
    }

    #[test]
    fn test_three_up_becomes_cube_at_bottom_of_two() {
        assert_eq!(
            arrive(SceneSlot::Three, Exit::Up, 400.0),
            Arrival::Cube { position: Vec2::new(0.0, -300.0) }
        );
    }

    #[test]
    fn test_three_down_enters_one_at_top_with_same_velocity() {
        assert_eq!(
            arrive(SceneSlot::Three, Exit::Down, 10.0),
            Arrival::Bubble { position: Vec2::new(10.0, 0.0), velocity: VelocityRule::Inherit(V) }
        );
    }

    #[test]
    fn test_velocity_rules_fix_sign_only() {
        let spawned = Vec2::new(-20.0, 75.0);
        assert_eq!(VelocityRule::Upward.apply(spawned), Vec2::new(-20.0, -75.0));
        assert_eq!(VelocityRule::Downward.apply(spawned), Vec2::new(-20.0, 75.0));
        assert_eq!(VelocityRule::Downward.apply(-spawned), Vec2::new(20.0, 75.0));
        assert_eq!(VelocityRule::Inherit(V).apply(spawned), V);
    }
}
