//! Read-only views of a frame for renderers.

use super::types::AgentId;
use crate::world::{Ground, Pipe, WorldConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub agent: AgentId,
    pub x: f64,
    pub y: f64,
    pub tilt: f64,
    pub wing_frame: usize,
    pub score: u32,
    pub fitness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub x: f64,
    pub width: f64,
    /// Bottom of the top pipe.
    pub gap_top: f64,
    /// Top of the bottom pipe.
    pub gap_bottom: f64,
    pub passed: bool,
}

impl From<&Pipe> for PipeView {
    fn from(pipe: &Pipe) -> Self {
        Self {
            x: pipe.x,
            width: pipe.width,
            gap_top: pipe.height,
            gap_bottom: pipe.bottom,
            passed: pipe.passed,
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub birds: Vec<BirdView>,
    pub pipes: Vec<PipeView>,
    pub ground: Ground,
    pub alive: usize,
    /// Highest bird score among living birds.
    pub score: u32,
}

impl FrameSnapshot {
    pub(crate) fn empty(config: &WorldConfig, ground: Ground) -> Self {
        Self {
            frame: 0,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            bird_width: config.bird_width as f64,
            bird_height: config.bird_height as f64,
            birds: Vec::new(),
            pipes: Vec::new(),
            ground,
            alive: 0,
            score: 0,
        }
    }
}
