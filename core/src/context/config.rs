//! Application configuration
//!
//! Re-exports the shared settings types from rift-echo-types and adds
//! persistence through confy plus path helpers for the voice assets.

use std::path::PathBuf;

use tracing::warn;

use super::error::ConfigError;

pub use rift_echo_types::{AppConfig, AudioSettings, FeedSettings, PlaybackSettings};

const APP_NAME: &str = "rift-echo";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and asset paths
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn voice_pack_path(&self) -> PathBuf;
    fn cue_table_path(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    /// Load the stored configuration, falling back to defaults if it is unreadable
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            warn!(error = %err, "Using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn voice_pack_path(&self) -> PathBuf {
        PathBuf::from(&self.assets_dir).join(&self.voice_pack)
    }

    fn cue_table_path(&self) -> PathBuf {
        PathBuf::from(&self.assets_dir).join(&self.cue_table)
    }
}
