//! The bird: kinematic jump arc, tilt, and score.

use super::config::WorldConfig;
use serde::{Deserialize, Serialize};

/// One bird. Physics parameters are read from the [`WorldConfig`] passed to
/// each call rather than stored per bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Horizontal position, fixed for the whole episode.
    pub x: f64,
    /// Vertical position of the sprite's top edge (down is positive).
    pub y: f64,
    /// Velocity set by the last jump.
    pub velocity: f64,
    /// Degrees, positive is nose up.
    pub tilt: f64,
    /// Frames elapsed since the last jump.
    pub tick_count: u32,
    /// Vertical position at the last jump.
    pub height: f64,
    /// Frames drawn, drives wing animation.
    pub img_count: u32,
    /// Pipes this bird has passed.
    pub score: u32,
}

impl Bird {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            tilt: 0.0,
            tick_count: 0,
            height: y,
            img_count: 0,
            score: 0,
        }
    }

    /// Bird at the configured start position.
    pub fn spawn(config: &WorldConfig) -> Self {
        Self::new(config.bird_start_x, config.bird_start_y)
    }

    /// Start a new jump arc from the current position.
    pub fn jump(&mut self, config: &WorldConfig) {
        self.velocity = config.jump_velocity;
        self.tick_count = 0;
        self.height = self.y;
    }

    /// Vertical displacement `t` frames into an arc started at `velocity`.
    ///
    /// Rising displacement gets an extra upward boost, then the result is
    /// clamped to the terminal displacement in both directions.
    pub fn displacement(velocity: f64, t: u32, config: &WorldConfig) -> f64 {
        let t = t as f64;
        let mut d = velocity * t + 0.5 * config.gravity * t * t;
        if d < 0.0 {
            d -= config.upward_boost;
        }
        d.clamp(-config.terminal_displacement, config.terminal_displacement)
    }

    /// Advance one frame. Returns the displacement applied.
    pub fn advance(&mut self, config: &WorldConfig) -> f64 {
        self.tick_count += 1;
        let d = Self::displacement(self.velocity, self.tick_count, config);
        self.y += d;

        if d < 0.0 || self.y < self.height + config.tilt_margin {
            if self.tilt < config.max_rotation {
                self.tilt = config.max_rotation;
            }
        } else if self.tilt > config.min_rotation {
            self.tilt = (self.tilt - config.rotation_velocity).max(config.min_rotation);
        }
        d
    }

    /// Count one drawn frame.
    pub fn animate(&mut self) {
        self.img_count = self.img_count.wrapping_add(1);
    }

    /// Wing frame (0..3) to draw for the current animation count.
    pub fn wing_frame(&self, config: &WorldConfig) -> usize {
        // Diving birds hold their wings level.
        if self.tilt <= -80.0 {
            return 1;
        }
        let period = config.animation_time.max(1);
        ((self.img_count % (period * 3)) / period) as usize
    }

    /// Lowest point of the sprite.
    pub fn bottom(&self, config: &WorldConfig) -> f64 {
        self.y + config.bird_height as f64
    }

    /// Sprite has touched the ground line.
    pub fn hit_ground(&self, config: &WorldConfig) -> bool {
        self.bottom(config) >= config.ground_y
    }

    /// Sprite has left the top of the canvas.
    pub fn hit_ceiling(&self) -> bool {
        self.y < 0.0
    }
}
