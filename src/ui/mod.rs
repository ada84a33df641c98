//! Terminal rendering for the training viewer.

pub mod flappy_scene;
pub mod layout;

pub use flappy_scene::{render_flappy, ViewerState};
