//! Live match announcer core
//!
//! Polls the local match feed, derives announcements from its event log and
//! plays them back one at a time. The two halves run as independent tasks:
//!
//! ```text
//!   PollLoop ──(Cue queue)──► CueSequencer ──► CuePlayer
//!      │
//!      └──(CoreEvent)──► presentation layer
//! ```

pub mod audio;
pub mod classifier;
pub mod context;
pub mod feed;
pub mod identity;
pub mod session;
pub mod state;
pub mod timers;

// Re-exports for convenience
pub use audio::{CueLookup, CuePlayer, CueSequencer, PlaybackError, RodioPlayer, StepOutcome};
pub use classifier::EventClassifier;
pub use context::{AppConfig, AppConfigExt, ConfigError};
pub use feed::{FeedClient, FeedError, FeedSource};
pub use identity::{Identity, IdentityError};
pub use session::{
    ConnectionState, CoreEvent, PollLoop, SharedState, StopSignal, TickOutcome,
    create_cue_channel, create_event_channel,
};
pub use state::MatchTracker;
pub use rift_echo_types::{Cue, CueCategory};
