//! Typed views over the feed's JSON payloads

use serde::Deserialize;
use serde_json::Value;

use super::error::SnapshotError;

// ─────────────────────────────────────────────────────────────────────────────
// Participants
// ─────────────────────────────────────────────────────────────────────────────

/// Side of the map a participant plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Order,
    Chaos,
}

impl Team {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("ORDER") {
            Some(Team::Order)
        } else if value.eq_ignore_ascii_case("CHAOS") {
            Some(Team::Chaos)
        } else {
            None
        }
    }
}

/// `activeplayer` endpoint (only the identity fields are read)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayer {
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default)]
    pub riot_id_game_name: Option<String>,
}

impl ActivePlayer {
    /// Summoner name, falling back to the Riot ID game name
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.summoner_name.as_deref()).or(non_empty(self.riot_id_game_name.as_deref()))
    }
}

/// One entry of the `playerlist` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    #[serde(default)]
    pub summoner_name: Option<String>,
    #[serde(default)]
    pub riot_id_game_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerEntry {
    /// Every non-empty name this participant may appear under in events
    pub fn names(&self) -> impl Iterator<Item = &str> {
        non_empty(self.summoner_name.as_deref())
            .into_iter()
            .chain(non_empty(self.riot_id_game_name.as_deref()))
    }

    pub fn team(&self) -> Option<Team> {
        self.team.as_deref().and_then(Team::parse)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Raw event as it appears in `events.Events`. Field presence depends on the type.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "EventName")]
    name: String,
    #[serde(rename = "EventID", default)]
    id: Option<u64>,
    #[serde(rename = "KillerName", default)]
    killer: Option<String>,
    #[serde(rename = "VictimName", default)]
    victim: Option<String>,
    #[serde(rename = "Result", default)]
    result: Option<String>,
    #[serde(rename = "KillStreak", default)]
    kill_streak: Option<u32>,
    #[serde(rename = "AcingTeam", default)]
    acing_team: Option<String>,
}

/// Typed event payload
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStart,
    MinionsSpawning,
    GameEnd { won: bool },
    TurretKilled { killer: String },
    InhibKilled { killer: String },
    DragonKill { killer: String },
    BaronKill { killer: String },
    /// Contested neutral objective (void grubs), announced in groups
    HordeKill { killer: String },
    HeraldKill { killer: String },
    Multikill { killer: String, streak: u32 },
    Ace { acing_team: Option<Team> },
    ChampionKill { killer: String, victim: String },
    /// Event types with no announcement
    Other(String),
}

/// An event from the append-only log, with its optional dedup identifier
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub id: Option<u64>,
    pub kind: GameEvent,
}

impl FeedEvent {
    pub fn new(id: Option<u64>, kind: GameEvent) -> Self {
        Self { id, kind }
    }

    fn from_raw(index: usize, raw: RawEvent) -> Result<Self, SnapshotError> {
        let RawEvent {
            name,
            id,
            killer,
            victim,
            result,
            kill_streak,
            acing_team,
        } = raw;

        let require = |value: Option<String>, field: &'static str| {
            value.ok_or_else(|| SnapshotError::MalformedEvent {
                index,
                name: name.clone(),
                field,
            })
        };

        let kind = match name.as_str() {
            "GameStart" => GameEvent::GameStart,
            "MinionsSpawning" => GameEvent::MinionsSpawning,
            "GameEnd" => GameEvent::GameEnd {
                won: result.as_deref() == Some("Win"),
            },
            "TurretKilled" => GameEvent::TurretKilled {
                killer: require(killer, "KillerName")?,
            },
            "InhibKilled" => GameEvent::InhibKilled {
                killer: require(killer, "KillerName")?,
            },
            "DragonKill" => GameEvent::DragonKill {
                killer: require(killer, "KillerName")?,
            },
            "BaronKill" => GameEvent::BaronKill {
                killer: require(killer, "KillerName")?,
            },
            "HordeKill" => GameEvent::HordeKill {
                killer: require(killer, "KillerName")?,
            },
            "HeraldKill" => GameEvent::HeraldKill {
                killer: require(killer, "KillerName")?,
            },
            "Multikill" => {
                let killer = require(killer, "KillerName")?;
                let streak = kill_streak.ok_or_else(|| SnapshotError::MalformedEvent {
                    index,
                    name: name.clone(),
                    field: "KillStreak",
                })?;
                GameEvent::Multikill { killer, streak }
            }
            "Ace" => GameEvent::Ace {
                acing_team: acing_team.as_deref().and_then(Team::parse),
            },
            "ChampionKill" => GameEvent::ChampionKill {
                killer: require(killer, "KillerName")?,
                victim: require(victim, "VictimName")?,
            },
            _ => GameEvent::Other(name.clone()),
        };

        Ok(Self { id, kind })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// The parts of `allgamedata` the poll loop consumes.
///
/// Events are kept as raw JSON and only decoded past the caller's cursor,
/// so an old event the feed mangled cannot stall the loop once consumed.
#[derive(Debug, Clone)]
pub struct MatchSnapshot {
    pub game_time: f64,
    events: Vec<Value>,
}

impl MatchSnapshot {
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let game_time = value
            .pointer("/gameData/gameTime")
            .and_then(Value::as_f64)
            .ok_or(SnapshotError::MissingField {
                field: "gameData.gameTime",
            })?;

        let events = match value.pointer("/events/Events") {
            Some(Value::Array(events)) => events.clone(),
            _ => {
                return Err(SnapshotError::MissingField {
                    field: "events.Events",
                });
            }
        };

        Ok(Self { game_time, events })
    }

    /// Length of the event log
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Decode every event at or after `cursor`, in log order.
    ///
    /// Each event is decoded on its own, so a malformed record only
    /// yields an error in its own slot.
    pub fn events_since(
        &self,
        cursor: usize,
    ) -> impl Iterator<Item = Result<FeedEvent, SnapshotError>> + '_ {
        self.events
            .iter()
            .enumerate()
            .skip(cursor)
            .map(|(index, value)| {
                let raw = RawEvent::deserialize(value)
                    .map_err(|source| SnapshotError::InvalidEvent { index, source })?;
                FeedEvent::from_raw(index, raw)
            })
    }
}
