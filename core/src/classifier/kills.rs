//! Champion kill announcements: executions, streaks and shutdowns

use rift_echo_types::Cue;

use crate::identity::Identity;
use crate::state::MatchTracker;

/// Named streak milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreeTier {
    Rampage,
    Godlike,
    Legendary,
}

impl SpreeTier {
    /// Tier reached by a streak of exactly `streak`, if any.
    /// 3 and 6 announce once; every kill from 8 on announces the top tier.
    pub fn for_streak(streak: u32) -> Option<Self> {
        match streak {
            3 => Some(SpreeTier::Rampage),
            6 => Some(SpreeTier::Godlike),
            s if s >= 8 => Some(SpreeTier::Legendary),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SpreeTier::Rampage => "rampage",
            SpreeTier::Godlike => "godlike",
            SpreeTier::Legendary => "legendary",
        }
    }
}

/// Whose achievement a kill is, from the local player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Perspective {
    Local,
    Ally,
    Enemy,
}

impl Perspective {
    fn of(identity: &Identity, killer: &str) -> Self {
        if identity.is_local(killer) {
            Perspective::Local
        } else if identity.is_local_team(identity.team_of(killer)) {
            Perspective::Ally
        } else {
            Perspective::Enemy
        }
    }

    fn spree(self, tier: SpreeTier) -> Cue {
        match self {
            Perspective::Local => Cue::player(tier.key()),
            Perspective::Ally => Cue::team(format!("ally_{}", tier.key())),
            Perspective::Enemy => Cue::team(format!("enemy_{}", tier.key())),
        }
    }

    /// An allied killer ends an enemy streak, and vice versa
    fn shutdown(self) -> Cue {
        match self {
            Perspective::Local => Cue::player("shutdown"),
            Perspective::Ally => Cue::team("shutdown_enemy"),
            Perspective::Enemy => Cue::team("shutdown_ally"),
        }
    }
}

/// Cues for one champion kill: a baseline line, then optionally a spree
/// line and a shutdown line, in that order.
pub(super) fn champion_kill(
    identity: &Identity,
    tracker: &mut MatchTracker,
    killer: &str,
    victim: &str,
) -> Vec<Cue> {
    // Turrets, minions and monsters are not in the player list
    if !identity.is_participant(killer) {
        return vec![execution(identity, victim)];
    }

    let streak = tracker.record_kill(killer);
    let was_shutdown = tracker.record_death(victim);
    let perspective = Perspective::of(identity, killer);

    let mut cues = Vec::with_capacity(3);
    cues.push(baseline(identity, killer, victim));
    if let Some(tier) = SpreeTier::for_streak(streak) {
        cues.push(perspective.spree(tier));
    }
    if was_shutdown {
        cues.push(perspective.shutdown());
    }
    cues
}

fn execution(identity: &Identity, victim: &str) -> Cue {
    if identity.is_local(victim) {
        Cue::player("executed")
    } else if identity.is_local_team(identity.team_of(victim)) {
        Cue::team("executed_ally")
    } else {
        Cue::team("executed_enemy")
    }
}

fn baseline(identity: &Identity, killer: &str, victim: &str) -> Cue {
    if identity.is_local(victim) {
        Cue::player("death")
    } else if identity.is_local(killer) {
        Cue::player("kill")
    } else if identity.is_local_team(identity.team_of(victim)) {
        Cue::team("ally_slain")
    } else {
        Cue::team("enemy_slain")
    }
}

#[cfg(test)]
mod tests {
    use super::SpreeTier;

    #[test]
    fn spree_tiers() {
        let tiers: Vec<_> = (1..=10).map(SpreeTier::for_streak).collect();
        assert_eq!(
            tiers,
            vec![
                None,
                None,
                Some(SpreeTier::Rampage),
                None,
                None,
                Some(SpreeTier::Godlike),
                None,
                Some(SpreeTier::Legendary),
                Some(SpreeTier::Legendary),
                Some(SpreeTier::Legendary),
            ]
        );
    }
}
