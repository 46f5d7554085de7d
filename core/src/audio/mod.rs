//! Cue playback
//!
//! - `lookup`: category/key to filename table
//! - `player`: clip playback behind the [`CuePlayer`] seam
//! - `sequencer`: gated, one-at-a-time drain of the cue queue

mod error;
mod lookup;
mod player;
mod sequencer;

#[cfg(test)]
mod sequencer_tests;

pub use error::{LookupError, PlaybackError};
pub use lookup::CueLookup;
pub use player::{CuePlayer, RodioPlayer};
pub use sequencer::{CueSequencer, StepOutcome};
