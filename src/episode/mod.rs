//! Training episodes.
//!
//! An episode pairs each controller with a bird and a fitness accumulator,
//! then steps the shared world one frame at a time until every bird is gone
//! or the episode is stopped. Agents removed mid-frame are marked and
//! compacted once the frame is over, so no agent is skipped or penalized
//! twice.

pub mod logic;
pub mod snapshot;
pub mod types;

pub use logic::*;
pub use snapshot::*;
pub use types::*;
