//! Scrolling ground strip made of two wrapping tiles.

use super::config::WorldConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub width: f64,
}

impl Ground {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            y: config.ground_y,
            x1: 0.0,
            x2: config.ground_width,
            width: config.ground_width,
        }
    }

    /// Scroll both tiles left, moving a tile that has left the screen to the
    /// right of the other one.
    pub fn advance(&mut self, config: &WorldConfig) {
        self.x1 -= config.ground_velocity;
        self.x2 -= config.ground_velocity;

        if self.x1 + self.width < 0.0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0.0 {
            self.x2 = self.x1 + self.width;
        }
    }
}
