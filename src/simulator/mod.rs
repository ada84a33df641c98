//! Headless training driver.
//!
//! Runs one episode per generation, pulling controllers from a
//! [`ControllerSource`] and reporting per-generation fitness:
//! - best, mean and worst fitness
//! - best pipe score
//! - episode length and why it ended

mod config;
mod report;
mod runner;
mod source;

pub use config::SimConfig;
pub use report::{GenerationStats, TrainingReport};
pub use runner::{run_training, run_training_with, training_rng, FrameObserver, Headless};
pub use source::{ControllerSource, RandomNetworks};
