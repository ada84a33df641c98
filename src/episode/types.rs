//! Episode data structures.

use crate::world::Bird;
use serde::{Deserialize, Serialize};

/// Stable identity of an agent for the lifetime of an episode. Equal to the
/// agent's position in the population handed to the episode.
pub type AgentId = usize;

/// Why an agent left the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    PipeCollision,
    Ground,
    Ceiling,
    ControllerFault,
}

/// Per-agent state. `Removed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Alive,
    Removed(DeathCause),
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// Every agent was removed.
    Extinct,
    /// The configured frame limit was reached.
    FrameLimit,
    /// Stopped from outside (viewer closed).
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeState {
    Running,
    Terminated(EpisodeEnd),
}

/// One controller flying one bird, writing into a fitness accumulator owned
/// by whoever started the episode.
pub struct Agent<'a, C> {
    pub id: AgentId,
    pub controller: C,
    pub fitness: &'a mut f64,
    pub bird: Bird,
    pub status: AgentStatus,
}

impl<C> Agent<'_, C> {
    pub fn is_alive(&self) -> bool {
        self.status == AgentStatus::Alive
    }
}

/// An agent removed during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub agent: AgentId,
    pub cause: DeathCause,
}

/// What happened during one call to `Episode::step`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    /// At least one pipe was passed this frame.
    pub scored: bool,
    pub removals: Vec<Removal>,
    /// Agents still alive after the frame.
    pub alive: usize,
}

/// Result of a full episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub frames: u64,
    pub end: EpisodeEnd,
    /// Highest pipe count reached by any bird.
    pub best_score: u32,
}
