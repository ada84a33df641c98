//! Training configuration.

use crate::controller::Activation;
use crate::error::SimError;
use crate::world::WorldConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of generations (episodes) to run
    pub generations: u32,

    /// Birds per generation
    pub population_size: usize,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per episode before it is cut off (None = until extinction)
    pub max_frames_per_episode: Option<u64>,

    /// Stop training once a bird passes this many pipes
    pub target_score: Option<u32>,

    /// Hidden layer widths of generated networks
    pub hidden_layers: Vec<usize>,
    pub hidden_activation: Activation,
    pub output_activation: Activation,

    /// Initial weights are drawn from (-weight_range, weight_range)
    pub weight_range: f64,

    /// Log verbosity (0 = warnings, 1 = per generation, 2 = per event)
    pub verbosity: u8,

    /// Physics and reward constants
    pub world: WorldConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            population_size: 20,
            seed: None,
            max_frames_per_episode: Some(10_000),
            target_score: None,
            hidden_layers: vec![6],
            hidden_activation: Activation::Tanh,
            output_activation: Activation::Sigmoid,
            weight_range: 2.0,
            verbosity: 1,
            world: WorldConfig::default(),
        }
    }
}

impl SimConfig {
    /// Quick config for smoke runs
    pub fn quick() -> Self {
        Self {
            generations: 5,
            population_size: 10,
            max_frames_per_episode: Some(2_000),
            ..Default::default()
        }
    }

    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.population_size == 0 {
            return Err(SimError::InvalidConfig(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.hidden_layers.contains(&0) {
            return Err(SimError::InvalidConfig(
                "hidden layers must have at least one node".to_string(),
            ));
        }
        if !self.weight_range.is_finite() || self.weight_range < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "weight_range must be a non-negative number, got {}",
                self.weight_range
            )));
        }
        self.world.validate()
    }
}
