//! Per-match derived state
//!
//! Everything the classifier remembers between events lives in a
//! [`MatchTracker`]: kill streaks, processed event identifiers, scheduled
//! timers, static warnings and the contested-objective window.
//!
//! A tracker is bound to exactly one match. The poll loop owns it
//! exclusively and replaces it with a fresh one whenever the session drops.

mod objective;
mod streaks;

use hashbrown::HashSet;
use rift_echo_types::Cue;

use crate::timers::{StaticWarning, TimerManager};

pub use objective::{OBJECTIVE_WINDOW, ObjectiveAggregate, Side};
pub use streaks::{KillStreakTable, SHUTDOWN_THRESHOLD};

#[derive(Debug, Clone, Default)]
pub struct MatchTracker {
    streaks: KillStreakTable,
    processed: HashSet<u64>,
    timers: TimerManager,
    horde: ObjectiveAggregate,
}

impl MatchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warnings(warnings: Vec<StaticWarning>) -> Self {
        Self {
            timers: TimerManager::with_warnings(warnings),
            ..Self::default()
        }
    }

    pub fn record_kill(&mut self, killer: &str) -> u32 {
        self.streaks.record_kill(killer)
    }

    /// Returns true if the streak that ended was a shutdown
    pub fn record_death(&mut self, victim: &str) -> bool {
        self.streaks.record_death(victim)
    }

    pub fn streak(&self, name: &str) -> u32 {
        self.streaks.get(name)
    }

    /// Mark an event identifier as classified. Returns false if it already was.
    pub fn mark_processed(&mut self, id: u64) -> bool {
        self.processed.insert(id)
    }

    pub fn schedule_timer(&mut self, now: f64, delay: f64, cue: Cue) {
        self.timers.schedule(now, delay, cue);
    }

    /// Cues that came due at `now`: scheduled timers first, then static warnings
    pub fn poll_timers(&mut self, now: f64) -> Vec<Cue> {
        self.timers.poll(now)
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    /// Tally a contested objective kill; returns the majority side once the window fills
    pub fn record_horde_kill(&mut self, side: Side) -> Option<Side> {
        self.horde.record(side)
    }

    pub fn horde_counts(&self) -> (u32, u32) {
        self.horde.counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_ids_are_remembered() {
        let mut tracker = MatchTracker::new();
        assert!(tracker.mark_processed(7));
        assert!(!tracker.mark_processed(7));
        assert!(tracker.mark_processed(8));
    }

    #[test]
    fn kill_then_death_of_same_match() {
        let mut tracker = MatchTracker::new();
        for _ in 0..4 {
            tracker.record_kill("Carry");
        }
        assert_eq!(tracker.streak("Carry"), 4);
        assert!(tracker.record_death("Carry"));
        assert_eq!(tracker.streak("Carry"), 0);
    }

    #[test]
    fn fresh_tracker_forgets_everything() {
        let mut tracker = MatchTracker::new();
        tracker.record_kill("Carry");
        tracker.mark_processed(1);
        tracker.schedule_timer(0.0, 10.0, Cue::global("minions_soon"));
        tracker.record_horde_kill(Side::Local);

        let tracker = MatchTracker::new();
        assert_eq!(tracker.streak("Carry"), 0);
        assert!(tracker.timers().scheduled().is_empty());
        assert_eq!(tracker.horde_counts(), (0, 0));
    }

    #[test]
    fn poll_timers_reports_scheduled_cues() {
        let mut tracker = MatchTracker::with_warnings(Vec::new());
        tracker.schedule_timer(5.0, 15.0, Cue::global("minions_soon"));
        assert!(tracker.poll_timers(19.0).is_empty());
        assert_eq!(tracker.poll_timers(20.0), vec![Cue::global("minions_soon")]);
    }
}
