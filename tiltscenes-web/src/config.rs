use serde::{Deserialize, Serialize};

use crate::error::StageError;

/// Everything tunable about the stage. Every field has a default, so an
/// empty TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Random seed; the clock is used when absent.
    pub seed: Option<u64>,
    /// Force the debug UI on (it is also enabled by `#debug` in the URL).
    pub debug: bool,
    pub canvases: CanvasConfig,
    pub physics: PhysicsConfig,
    pub cubes: CubesConfig,
    pub bubbles: BubblesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas element ids, top to bottom.
    pub ids: [String; 3],
    /// Element that asks for motion permission and pulses.
    pub button: String,
    /// Element that receives the debug text line.
    pub debug_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed step of every scene runner, in seconds.
    pub timestep: f32,
    /// Cap on fixed steps per frame.
    pub max_substeps: u32,
    /// Acceleration in px/s² for a gravity component of 1.
    pub gravity: f32,
    /// Pixels per engine metre.
    pub length_unit: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubesConfig {
    pub count: usize,
    pub size: f32,
    pub wall_thickness: f32,
    pub restitution: f32,
    /// Initial value of the `gScale` debug parameter.
    pub gravity_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubblesConfig {
    pub count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Largest velocity component of a fresh bubble, px/s.
    pub max_speed: f32,
    /// Initial value of the `speed` debug parameter, in [-1, 1].
    pub speed: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            seed: None,
            debug: false,
            canvases: CanvasConfig::default(),
            physics: PhysicsConfig::default(),
            cubes: CubesConfig::default(),
            bubbles: BubblesConfig::default(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            ids: [
                "canvas-scene-1".to_string(),
                "canvas-scene-2".to_string(),
                "canvas-scene-3".to_string(),
            ],
            button: "btn-access".to_string(),
            debug_line: "debug-dom".to_string(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_substeps: 5,
            gravity: 1000.0,
            length_unit: 100.0,
        }
    }
}

impl Default for CubesConfig {
    fn default() -> Self {
        Self {
            count: 10,
            size: 40.0,
            wall_thickness: 10.0,
            restitution: 0.3,
            gravity_scale: 1.0,
        }
    }
}

impl Default for BubblesConfig {
    fn default() -> Self {
        Self {
            count: 10,
            radius_min: 10.0,
            radius_max: 30.0,
            max_speed: 150.0,
            speed: 1.0,
        }
    }
}

impl StageConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, StageError> {
        let config: StageConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StageError> {
        let invalid = |msg: &str| Err(StageError::InvalidConfig(msg.to_string()));
        if !(self.physics.timestep > 0.0) {
            return invalid("physics.timestep must be positive");
        }
        if self.physics.max_substeps == 0 {
            return invalid("physics.max_substeps must be at least 1");
        }
        if !(self.physics.length_unit > 0.0) {
            return invalid("physics.length_unit must be positive");
        }
        if !(self.cubes.size > 0.0) {
            return invalid("cubes.size must be positive");
        }
        if !(self.bubbles.radius_min > 0.0) || self.bubbles.radius_max < self.bubbles.radius_min {
            return invalid("bubbles radius range must be positive and ordered");
        }
        if !(-1.0..=1.0).contains(&self.bubbles.speed) {
            return invalid("bubbles.speed must be within [-1, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = StageConfig::from_toml_str("").unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = StageConfig::from_toml_str(
            r#"
            seed = 7

            [cubes]
            count = 3

            [bubbles]
            speed = -0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cubes.count, 3);
        assert_eq!(config.cubes.size, 40.0);
        assert_eq!(config.bubbles.speed, -0.5);
        assert_eq!(config.canvases.ids[1], "canvas-scene-2");
    }

    #[test]
    fn test_rejects_bad_radius_range() {
        let err = StageConfig::from_toml_str(
            r#"
            [bubbles]
            radius_min = 30.0
            radius_max = 10.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, StageError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let err = StageConfig::from_toml_str("[physics]\ntimestep = 0.0\n").unwrap_err();
        assert!(matches!(err, StageError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = StageConfig::from_toml_str("seed = [").unwrap_err();
        assert!(matches!(err, StageError::ConfigParse(_)));
    }
}
