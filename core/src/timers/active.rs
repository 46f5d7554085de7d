//! Scheduled timer instances (runtime state)
//!
//! A `ScheduledTimer` is created by an event (an objective falling, the
//! match starting) at the current match time plus a fixed delay. It fires
//! once and is removed.

use rift_echo_types::Cue;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTimer {
    /// Absolute match time at which the cue is due
    pub trigger_at: f64,
    pub cue: Cue,
}

impl ScheduledTimer {
    pub fn new(now: f64, delay: f64, cue: Cue) -> Self {
        Self {
            trigger_at: now + delay,
            cue,
        }
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.trigger_at
    }
}
