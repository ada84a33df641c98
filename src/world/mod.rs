//! Flappy world entities.
//!
//! The bird, pipes and ground are plain data advanced one frame at a time.
//! Constants come from an injected [`WorldConfig`]; randomness from a
//! caller-supplied RNG so episodes can be replayed from a seed.

pub mod bird;
pub mod config;
pub mod ground;
pub mod mask;
pub mod pipe;
pub mod stream;

pub use bird::Bird;
pub use config::{PipeLookahead, WorldConfig};
pub use ground::Ground;
pub use mask::{Mask, Silhouettes};
pub use pipe::Pipe;
pub use stream::{add_pipe, delete_pipe, pass_check};
