//! Timer system
//!
//! This module provides:
//! - **Scheduled timers**: one-shot cues created by events, due at a match time
//! - **Static warnings**: one-shot cues at fixed match times, independent of events
//! - **Manager**: owns both lists and reports which cues came due on each poll
//!
//! All times are match time in seconds as reported by the feed. Timers
//! fire on the first poll at or after their trigger time, so accuracy is
//! bounded by the poll cadence.

mod active;
mod definition;
mod manager;

#[cfg(test)]
mod manager_tests;

pub use active::ScheduledTimer;
pub use definition::{StaticWarning, default_warnings};
pub use manager::TimerManager;
