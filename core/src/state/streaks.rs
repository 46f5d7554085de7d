//! Kill streak bookkeeping

use hashbrown::HashMap;

/// Streak length at which ending it counts as a shutdown
pub const SHUTDOWN_THRESHOLD: u32 = 3;

/// Consecutive kills per participant since their last death
#[derive(Debug, Clone, Default)]
pub struct KillStreakTable {
    streaks: HashMap<String, u32>,
}

impl KillStreakTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> u32 {
        self.streaks.get(name).copied().unwrap_or(0)
    }

    /// Credit one kill and return the new streak
    pub fn record_kill(&mut self, killer: &str) -> u32 {
        let streak = self.streaks.entry(killer.to_string()).or_insert(0);
        *streak += 1;
        *streak
    }

    /// Reset the victim's streak. Returns true if the reset streak was a shutdown.
    pub fn record_death(&mut self, victim: &str) -> bool {
        let previous = self
            .streaks
            .insert(victim.to_string(), 0)
            .unwrap_or(0);
        previous >= SHUTDOWN_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_count_up_from_one() {
        let mut table = KillStreakTable::new();
        let counts: Vec<u32> = (0..5).map(|_| table.record_kill("K")).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn death_resets_to_zero() {
        let mut table = KillStreakTable::new();
        table.record_kill("K");
        table.record_kill("K");
        assert!(!table.record_death("K"));
        assert_eq!(table.get("K"), 0);
        assert_eq!(table.record_kill("K"), 1);
    }

    #[test]
    fn shutdown_only_from_three_or_more() {
        let mut table = KillStreakTable::new();
        for _ in 0..2 {
            table.record_kill("Two");
        }
        for _ in 0..3 {
            table.record_kill("Three");
        }
        assert!(!table.record_death("Two"));
        assert!(table.record_death("Three"));
        // Streak is already gone; a second death is not another shutdown
        assert!(!table.record_death("Three"));
    }

    #[test]
    fn unknown_victim_is_not_a_shutdown() {
        let mut table = KillStreakTable::new();
        assert!(!table.record_death("Nobody"));
    }
}
