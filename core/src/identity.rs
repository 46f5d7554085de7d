//! Local player identity for one connected session
//!
//! Built once per connection from the `activeplayer` and `playerlist`
//! endpoints, then read-only until the session ends.

use hashbrown::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::feed::{ActivePlayer, Endpoint, FeedError, FeedSource, PlayerEntry, Team};
use crate::session::{ConnectionState, CoreEvent, CoreEventSender, SharedState};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("feed unavailable while resolving identity")]
    Feed(#[from] FeedError),

    #[error("active player has no usable display name")]
    MissingName,

    #[error("malformed {endpoint} payload")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Identity {
    local_name: String,
    local_team: Option<Team>,
    /// Every known participant name (summoner and Riot ID) to team
    teams: HashMap<String, Team>,
}

impl Identity {
    pub fn from_feed(active: &ActivePlayer, players: &[PlayerEntry]) -> Result<Self, IdentityError> {
        let local_name = active
            .display_name()
            .ok_or(IdentityError::MissingName)?
            .to_string();

        let mut teams = HashMap::new();
        let mut local_team = None;
        for player in players {
            let Some(team) = player.team() else {
                continue;
            };
            for name in player.names() {
                teams.insert(name.to_string(), team);
                if name == local_name {
                    local_team = Some(team);
                }
            }
        }

        Ok(Self {
            local_name,
            local_team,
            teams,
        })
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn local_team(&self) -> Option<Team> {
        self.local_team
    }

    pub fn team_of(&self, name: &str) -> Option<Team> {
        self.teams.get(name).copied()
    }

    /// Minions, turrets and monsters never appear in the player list
    pub fn is_participant(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn is_local(&self, name: &str) -> bool {
        name == self.local_name
    }

    /// An unknown team never matches, even if the local team is unknown too
    pub fn is_local_team(&self, team: Option<Team>) -> bool {
        matches!((team, self.local_team), (Some(a), Some(b)) if a == b)
    }

    /// True when `name` is the local player or one of their teammates
    pub fn is_local_side(&self, name: &str) -> bool {
        self.is_local(name) || self.is_local_team(self.team_of(name))
    }
}

/// Resolve identity from the feed. Touches no session state.
pub async fn resolve<F: FeedSource>(feed: &F) -> Result<Identity, IdentityError> {
    let active = feed.fetch(Endpoint::ActivePlayer).await?;
    let players = feed.fetch(Endpoint::PlayerList).await?;

    let active: ActivePlayer =
        serde_json::from_value(active).map_err(|source| IdentityError::Malformed {
            endpoint: Endpoint::ActivePlayer.path(),
            source,
        })?;
    let players: Vec<PlayerEntry> =
        serde_json::from_value(players).map_err(|source| IdentityError::Malformed {
            endpoint: Endpoint::PlayerList.path(),
            source,
        })?;

    Identity::from_feed(&active, &players)
}

/// Resolve identity and, on success, publish the connected status.
///
/// This is the only place the status flips to connected.
pub async fn establish<F: FeedSource>(
    feed: &F,
    shared: &SharedState,
    events: &CoreEventSender,
) -> Result<Identity, IdentityError> {
    let identity = resolve(feed).await?;

    info!(
        name = %identity.local_name(),
        team = ?identity.local_team(),
        participants = identity.teams.len(),
        "Identity established"
    );
    shared.set_connected(true);
    if events
        .send(CoreEvent::ConnectionStatus(ConnectionState::Connected))
        .is_err()
    {
        debug!("Status receiver closed");
    }

    Ok(identity)
}
