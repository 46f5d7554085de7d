//! Timer management
//!
//! Holds scheduled one-shot timers and the match's static warnings, and
//! reports which cues came due on each poll.

use rift_echo_types::Cue;
use tracing::debug;

use super::{ScheduledTimer, StaticWarning, default_warnings};

#[derive(Debug, Clone)]
pub struct TimerManager {
    scheduled: Vec<ScheduledTimer>,
    warnings: Vec<StaticWarning>,
    /// Match time of the previous poll; `None` until the first one
    last_poll: Option<f64>,
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerManager {
    pub fn new() -> Self {
        Self::with_warnings(default_warnings())
    }

    pub fn with_warnings(warnings: Vec<StaticWarning>) -> Self {
        Self {
            scheduled: Vec::new(),
            warnings,
            last_poll: None,
        }
    }

    pub fn schedule(&mut self, now: f64, delay: f64, cue: Cue) {
        debug!(cue = %cue, delay, due_at = now + delay, "Timer scheduled");
        self.scheduled.push(ScheduledTimer::new(now, delay, cue));
    }

    /// Remove and return every scheduled cue due at `now`, then every static
    /// warning crossed for the first time.
    ///
    /// Warnings already behind the match clock on the first poll (joining a
    /// match in progress) are retired silently; they were never crossed.
    pub fn poll(&mut self, now: f64) -> Vec<Cue> {
        if self.last_poll.is_none() {
            for warning in self.warnings.iter_mut().filter(|w| w.at < now) {
                warning.fired = true;
            }
        }
        self.last_poll = Some(now);

        let mut due = Vec::new();

        let (fired, pending): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|timer| timer.is_due(now));
        self.scheduled = pending;
        due.extend(fired.into_iter().map(|timer| timer.cue));

        for warning in self.warnings.iter_mut().filter(|w| !w.fired && now >= w.at) {
            warning.fired = true;
            due.push(warning.cue.clone());
        }

        due
    }

    pub fn scheduled(&self) -> &[ScheduledTimer] {
        &self.scheduled
    }

    pub fn warnings(&self) -> &[StaticWarning] {
        &self.warnings
    }
}
