mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, AudioSettings, FeedSettings, PlaybackSettings};
pub use error::ConfigError;
