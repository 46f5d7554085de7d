//! Aggregation of contested objective kills
//!
//! Some neutral objectives spawn as a group (void grubs). Announcing each
//! kill would spam the same line, so kills are tallied in windows of
//! [`OBJECTIVE_WINDOW`] and announced once per full window.

/// Kills per announced window
pub const OBJECTIVE_WINDOW: u32 = 3;

/// Which side an objective kill is credited to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Opponent,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveAggregate {
    local: u32,
    opponent: u32,
}

impl ObjectiveAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one kill. When the window fills, returns the majority side and
    /// resets both counters.
    ///
    /// A tie is credited to the opponent (`local > opponent` is required to
    /// count as taken). With two sides and an odd window a tie cannot occur
    /// today; the rule only matters if the window size changes.
    pub fn record(&mut self, side: Side) -> Option<Side> {
        match side {
            Side::Local => self.local += 1,
            Side::Opponent => self.opponent += 1,
        }

        if self.local + self.opponent < OBJECTIVE_WINDOW {
            return None;
        }

        let winner = if self.local > self.opponent {
            Side::Local
        } else {
            Side::Opponent
        };
        *self = Self::default();
        Some(winner)
    }

    pub fn counts(&self) -> (u32, u32) {
        (self.local, self.opponent)
    }
}
