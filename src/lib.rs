//! Flappy NEAT - a Flappy Bird training environment for evolved controllers.
//!
//! The library holds the simulation: bird physics, the pipe stream, pixel-mask
//! collision, and the episode loop that turns a population of controllers
//! into per-agent fitness. The `flappy-neat` binary draws training live in the
//! terminal; `simulate` runs it headless.

pub mod build_info;
pub mod controller;
pub mod episode;
pub mod error;
pub mod simulator;
pub mod world;

pub use controller::{Controller, FeedForwardNetwork, FixedPolicy};
pub use episode::{run_episode, Episode, EpisodeSummary, FrameReport, FrameSnapshot};
pub use error::{ControllerFault, SimError};
pub use simulator::{run_training, run_training_with, SimConfig, TrainingReport};
pub use world::WorldConfig;
