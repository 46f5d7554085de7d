//! Event classification
//!
//! Turns raw feed events into cues, in feed order. The classifier itself
//! is stateless; everything it remembers between events lives in the
//! [`MatchTracker`] passed in by the poll loop.
//!
//! ```text
//!   FeedEvent ──► dedup (EventID) ──► per-type rule ──► Vec<Cue>
//!                                        │
//!                                        ├─ streaks / shutdowns
//!                                        ├─ objective windows
//!                                        └─ scheduled warnings
//! ```

mod kills;


use rift_echo_types::Cue;
use tracing::debug;

use crate::feed::{FeedEvent, GameEvent};
use crate::identity::Identity;
use crate::state::{MatchTracker, Side};

pub use kills::SpreeTier;

/// Match-start announcements only play this early into a match
const START_GUARD_SECS: f64 = 30.0;
const MINIONS_SOON_DELAY: f64 = 15.0;

const INHIB_RESPAWNING_DELAY: f64 = 285.0;
const INHIB_LIVE_DELAY: f64 = 300.0;
const DRAGON_SPAWNING_DELAY: f64 = 270.0;
const DRAGON_LIVE_DELAY: f64 = 300.0;
const BARON_SPAWNING_DELAY: f64 = 330.0;
const BARON_LIVE_DELAY: f64 = 360.0;

pub struct EventClassifier {
    start_guard_secs: f64,
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventClassifier {
    pub fn new() -> Self {
        Self {
            start_guard_secs: START_GUARD_SECS,
        }
    }

    /// Classify one newly observed event.
    ///
    /// Events carrying an identifier are classified at most once per match.
    /// Events without one are always classified.
    pub fn classify(
        &self,
        event: &FeedEvent,
        match_time: f64,
        identity: &Identity,
        tracker: &mut MatchTracker,
    ) -> Vec<Cue> {
        if let Some(id) = event.id
            && !tracker.mark_processed(id)
        {
            debug!(id, "Skipping already processed event");
            return Vec::new();
        }

        match &event.kind {
            GameEvent::ChampionKill { killer, victim } => {
                kills::champion_kill(identity, tracker, killer, victim)
            }
            kind => self
                .classify_single(kind, match_time, identity, tracker)
                .into_iter()
                .collect(),
        }
    }

    fn classify_single(
        &self,
        kind: &GameEvent,
        match_time: f64,
        identity: &Identity,
        tracker: &mut MatchTracker,
    ) -> Option<Cue> {
        match kind {
            GameEvent::GameStart => {
                if match_time >= self.start_guard_secs {
                    debug!(match_time, "Ignoring late match start");
                    return None;
                }
                tracker.schedule_timer(match_time, MINIONS_SOON_DELAY, Cue::global("minions_soon"));
                Some(Cue::global("GameStart"))
            }

            GameEvent::MinionsSpawning => Some(Cue::global("MinionsSpawning")),

            GameEvent::GameEnd { won } => {
                Some(Cue::global(if *won { "victory" } else { "defeat" }))
            }

            GameEvent::TurretKilled { killer } => {
                Some(by_side(identity, killer, "turret_destroy", "turret_lost"))
            }

            GameEvent::InhibKilled { killer } => {
                tracker.schedule_timer(
                    match_time,
                    INHIB_RESPAWNING_DELAY,
                    Cue::warning("inhib_respawning"),
                );
                tracker.schedule_timer(match_time, INHIB_LIVE_DELAY, Cue::warning("inhib_live"));
                Some(by_side(identity, killer, "inhib_destroy", "inhib_lost"))
            }

            GameEvent::DragonKill { killer } => {
                tracker.schedule_timer(
                    match_time,
                    DRAGON_SPAWNING_DELAY,
                    Cue::warning("dragon_spawning"),
                );
                tracker.schedule_timer(match_time, DRAGON_LIVE_DELAY, Cue::warning("dragon_live"));
                Some(by_side(identity, killer, "dragon_taken", "dragon_lost"))
            }

            GameEvent::BaronKill { killer } => {
                tracker.schedule_timer(
                    match_time,
                    BARON_SPAWNING_DELAY,
                    Cue::warning("baron_spawning"),
                );
                tracker.schedule_timer(match_time, BARON_LIVE_DELAY, Cue::warning("baron_live"));
                Some(by_side(identity, killer, "baron_taken", "baron_lost"))
            }

            GameEvent::HordeKill { killer } => {
                let side = if identity.is_local_side(killer) {
                    Side::Local
                } else {
                    Side::Opponent
                };
                tracker.record_horde_kill(side).map(|winner| match winner {
                    Side::Local => Cue::team("grubs_taken"),
                    Side::Opponent => Cue::team("grubs_lost"),
                })
            }

            GameEvent::HeraldKill { killer } => {
                Some(by_side(identity, killer, "herald_taken", "herald_lost"))
            }

            GameEvent::Multikill { killer, streak } => identity
                .is_local(killer)
                .then(|| Cue::player(format!("multikill_{streak}"))),

            // "ace_enemy" is us acing them
            GameEvent::Ace { acing_team } => Some(Cue::global(
                if identity.is_local_team(*acing_team) {
                    "ace_enemy"
                } else {
                    "ace_us"
                },
            )),

            GameEvent::ChampionKill { .. } | GameEvent::Other(_) => None,
        }
    }
}

fn by_side(identity: &Identity, killer: &str, ours: &str, theirs: &str) -> Cue {
    Cue::team(if identity.is_local_side(killer) {
        ours
    } else {
        theirs
    })
}
