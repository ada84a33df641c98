//! Physical constants for the flappy world.
//!
//! Everything the entities need is injected through [`WorldConfig`] so tests
//! can run with alternate physics without touching globals.

use crate::error::SimError;
use serde::{Deserialize, Serialize};

/// Largest sprite side accepted for a collision silhouette.
pub const MAX_SPRITE_SIDE: u32 = 4096;

/// Which pipe is fed to the controller once the lead pipe is behind the bird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeLookahead {
    /// Use the second pipe only after the lead pipe's right edge is behind the bird.
    #[default]
    Positional,
    /// Use the second pipe whenever two or more pipes exist. Matches models
    /// trained against the old selection rule.
    Legacy,
}

/// Injected physics, geometry and reward constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // Canvas
    pub canvas_width: f64,
    pub canvas_height: f64,

    // Bird
    pub bird_start_x: f64,
    pub bird_start_y: f64,
    pub bird_width: u32,
    pub bird_height: u32,
    pub jump_velocity: f64,
    pub gravity: f64,
    /// Largest displacement magnitude per frame.
    pub terminal_displacement: f64,
    /// Extra upward displacement added while the bird is rising.
    pub upward_boost: f64,
    /// Bird keeps its nose up while within this many units below the jump height.
    pub tilt_margin: f64,
    pub max_rotation: f64,
    pub min_rotation: f64,
    pub rotation_velocity: f64,
    /// Frames each wing frame stays on screen.
    pub animation_time: u32,

    // Pipes
    pub pipe_width: u32,
    pub pipe_height: u32,
    /// Height of the lip at the open end of a pipe silhouette.
    pub pipe_cap_height: u32,
    /// Columns trimmed from each side of the pipe body below the lip.
    pub pipe_body_inset: u32,
    pub pipe_gap: f64,
    pub gap_min: i32,
    pub gap_max: i32,
    pub pipe_velocity: f64,
    pub pipe_spawn_x: f64,

    // Ground
    pub ground_y: f64,
    pub ground_width: f64,
    pub ground_velocity: f64,

    // Fitness
    pub survival_reward: f64,
    pub pass_bonus: f64,
    pub death_penalty: f64,
    /// Fitness assigned to an agent whose controller faulted.
    pub fault_fitness: f64,
    pub jump_threshold: f64,
    pub lookahead: PipeLookahead,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            canvas_height: 800.0,

            bird_start_x: 100.0,
            bird_start_y: 350.0,
            bird_width: 68,
            bird_height: 48,
            jump_velocity: -10.5,
            gravity: 3.0,
            terminal_displacement: 16.0,
            upward_boost: 2.0,
            tilt_margin: 50.0,
            max_rotation: 25.0,
            min_rotation: -90.0,
            rotation_velocity: 20.0,
            animation_time: 10,

            pipe_width: 104,
            pipe_height: 640,
            pipe_cap_height: 48,
            pipe_body_inset: 4,
            pipe_gap: 200.0,
            gap_min: 50,
            gap_max: 450,
            pipe_velocity: 5.0,
            pipe_spawn_x: 600.0,

            ground_y: 730.0,
            ground_width: 672.0,
            ground_velocity: 5.0,

            survival_reward: 0.1,
            pass_bonus: 1.0,
            death_penalty: 1.0,
            fault_fitness: -10.0,
            jump_threshold: 0.5,
            lookahead: PipeLookahead::Positional,
        }
    }
}

impl WorldConfig {
    /// Reject configurations the entities cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.bird_width == 0 || self.bird_height == 0 {
            return Err(SimError::InvalidConfig(
                "bird sprite must have non-zero size".to_string(),
            ));
        }
        if self.pipe_width == 0 || self.pipe_height == 0 {
            return Err(SimError::InvalidConfig(
                "pipe sprite must have non-zero size".to_string(),
            ));
        }
        let sides = [
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
        ];
        if let Some((name, side)) = sides.iter().find(|(_, side)| *side > MAX_SPRITE_SIDE) {
            return Err(SimError::InvalidConfig(format!(
                "{} is {}, at most {} is supported",
                name, side, MAX_SPRITE_SIDE
            )));
        }
        if self.gap_min >= self.gap_max {
            return Err(SimError::InvalidConfig(format!(
                "gap range [{}, {}) is empty",
                self.gap_min, self.gap_max
            )));
        }
        if self.pipe_gap <= 0.0 {
            return Err(SimError::InvalidConfig(
                "pipe gap must be positive".to_string(),
            ));
        }
        // Pipes must scroll left every frame or they are never passed.
        if self.pipe_velocity.is_nan() || self.pipe_velocity <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "pipe velocity must be positive, got {}",
                self.pipe_velocity
            )));
        }
        if self.ground_width <= 0.0 {
            return Err(SimError::InvalidConfig(
                "ground tile width must be positive".to_string(),
            ));
        }
        if self.terminal_displacement <= 0.0 {
            return Err(SimError::InvalidConfig(
                "terminal displacement must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_gap_range_rejected() {
        let config = WorldConfig {
            gap_min: 300,
            gap_max: 300,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_sized_bird_rejected() {
        let config = WorldConfig {
            bird_height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stalled_pipes_rejected() {
        for pipe_velocity in [0.0, -5.0, f64::NAN] {
            let config = WorldConfig {
                pipe_velocity,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(SimError::InvalidConfig(_))),
                "accepted pipe_velocity {}",
                pipe_velocity
            );
        }
    }

    #[test]
    fn test_oversized_sprite_rejected() {
        let config = WorldConfig {
            pipe_width: 70_000,
            pipe_height: 70_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = WorldConfig {
            bird_width: MAX_SPRITE_SIDE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: WorldConfig =
            serde_json::from_str(r#"{ "pipe_gap": 150.0, "lookahead": "legacy" }"#).unwrap();
        assert!((config.pipe_gap - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.lookahead, PipeLookahead::Legacy);
        assert!((config.gravity - 3.0).abs() < f64::EPSILON);
    }
}
