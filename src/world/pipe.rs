//! A top/bottom pipe pair with a random gap.

use super::bird::Bird;
use super::config::WorldConfig;
use super::mask::Silhouettes;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single pipe obstacle (top + bottom pair with a gap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    /// Gap-center: the bottom of the top pipe's opening.
    pub height: f64,
    /// Y of the top pipe sprite's upper edge (negative, above the canvas).
    pub top: f64,
    /// Y of the bottom pipe sprite's upper edge.
    pub bottom: f64,
    /// Whether a bird has passed this pipe (for scoring).
    pub passed: bool,
    /// Sprite width, used for pass and retirement checks.
    pub width: f64,
}

impl Pipe {
    /// Create a pipe at `x` with a freshly sampled gap.
    pub fn new<R: Rng>(x: f64, config: &WorldConfig, rng: &mut R) -> Self {
        let mut pipe = Self::with_height(x, 0.0, config);
        pipe.set_height(config, rng);
        pipe
    }

    /// Create a pipe with a fixed gap-center.
    pub fn with_height(x: f64, height: f64, config: &WorldConfig) -> Self {
        Self {
            x,
            height,
            top: height - config.pipe_height as f64,
            bottom: height + config.pipe_gap,
            passed: false,
            width: config.pipe_width as f64,
        }
    }

    /// Sample the gap-center uniformly from `[gap_min, gap_max)` and derive edges.
    pub fn set_height<R: Rng>(&mut self, config: &WorldConfig, rng: &mut R) {
        self.height = rng.gen_range(config.gap_min..config.gap_max) as f64;
        self.top = self.height - config.pipe_height as f64;
        self.bottom = self.height + config.pipe_gap;
    }

    /// Scroll left by one frame.
    pub fn advance(&mut self, config: &WorldConfig) {
        self.x -= config.pipe_velocity;
    }

    pub fn right_edge(&self) -> f64 {
        self.x + self.width
    }

    /// Pixel-accurate collision between the bird and either half of the pipe.
    pub fn collide(&self, bird: &Bird, silhouettes: &Silhouettes) -> bool {
        let dx = (self.x - bird.x).round() as i64;
        let bird_y = bird.y.round();
        let top_offset = (dx, (self.top - bird_y).round() as i64);
        let bottom_offset = (dx, (self.bottom - bird_y).round() as i64);

        silhouettes
            .bird
            .overlap(&silhouettes.pipe_bottom, bottom_offset)
            .is_some()
            || silhouettes
                .bird
                .overlap(&silhouettes.pipe_top, top_offset)
                .is_some()
    }
}
