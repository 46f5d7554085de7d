//! Shared configuration and cue types for Rift Echo
//!
//! This crate contains serializable types shared between the polling core
//! (rift-echo-core) and the presentation layer (the `rift-echo` binary).

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Cues
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level grouping of voice lines in the cue table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueCategory {
    /// Match-wide announcements (start, end, aces)
    Global,
    /// Lines spoken about the local player
    Player,
    /// Lines spoken about either team
    Team,
    /// Objective spawn warnings
    Warnings,
}

impl CueCategory {
    /// Key used for this category in the cue table
    pub fn as_str(&self) -> &'static str {
        match self {
            CueCategory::Global => "global",
            CueCategory::Player => "player",
            CueCategory::Team => "team",
            CueCategory::Warnings => "warnings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "global" => Some(CueCategory::Global),
            "player" => Some(CueCategory::Player),
            "team" => Some(CueCategory::Team),
            "warnings" => Some(CueCategory::Warnings),
            _ => None,
        }
    }
}

impl fmt::Display for CueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (category, key) pair identifying which voice line to play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cue {
    pub category: CueCategory,
    pub key: String,
}

impl Cue {
    pub fn new(category: CueCategory, key: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
        }
    }

    pub fn global(key: impl Into<String>) -> Self {
        Self::new(CueCategory::Global, key)
    }

    pub fn player(key: impl Into<String>) -> Self {
        Self::new(CueCategory::Player, key)
    }

    pub fn team(key: impl Into<String>) -> Self {
        Self::new(CueCategory::Team, key)
    }

    pub fn warning(key: impl Into<String>) -> Self {
        Self::new(CueCategory::Warnings, key)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feed Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://127.0.0.1:2999/liveclientdata".to_string()
}
fn default_request_timeout_ms() -> u64 {
    500
}
fn default_poll_interval_ms() -> u64 {
    250
}
fn default_reconnect_interval_ms() -> u64 {
    2000
}
fn default_identity_retry_ms() -> u64 {
    1000
}
fn default_failure_threshold() -> u32 {
    5
}

/// Connection and cadence settings for the live match feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Root of the local feed, endpoints are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; bounds worst-case shutdown latency
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Poll cadence while a match is connected
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Wait after a failed fetch while disconnected
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// Wait after the feed answered but identity could not be resolved
    #[serde(default = "default_identity_retry_ms")]
    pub identity_retry_ms: u64,

    /// Consecutive failures tolerated before a connected session is dropped
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            identity_retry_ms: default_identity_retry_ms(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Playback Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_drain_interval_ms() -> u64 {
    50
}
fn default_clip_ms() -> u64 {
    2000
}
fn default_gate_slack_ms() -> u64 {
    150
}

/// Cue sequencer cadence and gating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_drain_interval_ms")]
    pub drain_interval_ms: u64,

    /// Duration assumed when the decoder cannot report one
    #[serde(default = "default_clip_ms")]
    pub default_clip_ms: u64,

    /// Gap added after every clip before the next may start
    #[serde(default = "default_gate_slack_ms")]
    pub gate_slack_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            drain_interval_ms: default_drain_interval_ms(),
            default_clip_ms: default_clip_ms(),
            gate_slack_ms: default_gate_slack_ms(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_audio_volume() -> u8 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Volume level (0-100)
    #[serde(default = "default_audio_volume")]
    pub volume: u8,

    #[serde(default)]
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: default_audio_volume(),
            muted: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

fn default_assets_dir() -> String {
    "assets".to_string()
}
fn default_voice_pack() -> String {
    "Default".to_string()
}
fn default_cue_table() -> String {
    "events.json".to_string()
}

/// Persisted application configuration.
///
/// Note: Persistence methods (load/save) are provided by rift-echo-core via the
/// `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub audio: AudioSettings,

    /// Directory holding one sub-directory per voice pack
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Name of the active voice pack under `assets_dir`
    #[serde(default = "default_voice_pack")]
    pub voice_pack: String,

    /// JSON file mapping (category, key) to a filename inside the pack
    #[serde(default = "default_cue_table")]
    pub cue_table: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedSettings::default(),
            playback: PlaybackSettings::default(),
            audio: AudioSettings::default(),
            assets_dir: default_assets_dir(),
            voice_pack: default_voice_pack(),
            cue_table: default_cue_table(),
        }
    }
}
