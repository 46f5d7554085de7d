//! Poll loop: the connection state machine driving classification
//!
//! ```text
//!            fetch ok + identity resolved
//!   Disconnected ─────────────────────────► Connected
//!        ▲                                      │
//!        └──── failures > failure_threshold ────┘
//! ```
//!
//! The loop exclusively owns the [`MatchTracker`] and event cursor of the
//! current session. Other tasks only see the shared flags and the cue
//! and status channels.

mod state;


use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use rift_echo_types::{Cue, FeedSettings};
use tracing::{debug, info, warn};

use crate::classifier::EventClassifier;
use crate::feed::{Endpoint, FeedSource, MatchSnapshot};
use crate::identity::{self, Identity};
use crate::state::MatchTracker;

pub use state::{
    ConnectionState, CoreEvent, CoreEventSender, CueReceiver, CueSender, SharedState, StopSignal,
    create_cue_channel, create_event_channel,
};

/// What a single tick did, used to pick the delay before the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session established this tick
    Connected,
    /// Connected tick that consumed the snapshot
    Polled { cues: usize },
    /// Feed unreachable or its snapshot unusable; still within tolerance
    /// or already disconnected
    FetchFailed,
    /// Failure threshold exceeded; the session was dropped this tick
    Disconnected,
    /// Feed answered but the local player could not be resolved
    IdentityUnresolved,
}

/// Everything scoped to one connected match
struct Session {
    identity: Identity,
    tracker: MatchTracker,
    cursor: usize,
}

pub struct PollLoop<F: FeedSource> {
    feed: F,
    settings: FeedSettings,
    classifier: EventClassifier,
    shared: Arc<SharedState>,
    events: CoreEventSender,
    cues: CueSender,
    /// Consecutive fetches that produced no usable snapshot
    failures: u32,
    session: Option<Session>,
}

impl<F: FeedSource> PollLoop<F> {
    pub fn new(
        feed: F,
        settings: FeedSettings,
        shared: Arc<SharedState>,
        events: CoreEventSender,
        cues: CueSender,
    ) -> Self {
        Self {
            feed,
            settings,
            classifier: EventClassifier::new(),
            shared,
            events,
            cues,
            failures: 0,
            session: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        if self.session.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Index of the first unconsumed event; 0 while disconnected
    pub fn cursor(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.cursor)
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.as_ref().map(|s| &s.identity)
    }

    pub fn tracker(&self) -> Option<&MatchTracker> {
        self.session.as_ref().map(|s| &s.tracker)
    }

    /// Run until `stop` is raised. Checked once per cycle.
    pub async fn run(mut self, stop: StopSignal) {
        info!(
            poll_ms = self.settings.poll_interval_ms,
            threshold = self.settings.failure_threshold,
            "Poll loop started"
        );

        while !stop.is_stopped() {
            let outcome = self.tick().await;
            tokio::time::sleep(self.delay_after(outcome)).await;
        }

        info!("Poll loop stopped");
    }

    /// Fetch one snapshot and advance the state machine
    pub async fn tick(&mut self) -> TickOutcome {
        let value = match self.feed.fetch(Endpoint::AllGameData).await {
            Ok(value) => value,
            Err(err) => return self.on_failure(&err),
        };
        // A body without game time or event log counts the same as no answer
        let snapshot = match MatchSnapshot::from_value(value) {
            Ok(snapshot) => snapshot,
            Err(err) => return self.on_failure(&err),
        };
        self.failures = 0;

        if self.session.is_none() {
            return self.connect(&snapshot).await;
        }
        let cues = self.advance(&snapshot);
        let count = cues.len();
        self.enqueue_all(cues);
        TickOutcome::Polled { cues: count }
    }

    pub fn delay_after(&self, outcome: TickOutcome) -> Duration {
        let ms = match outcome {
            TickOutcome::Connected | TickOutcome::Polled { .. } => self.settings.poll_interval_ms,
            TickOutcome::IdentityUnresolved => self.settings.identity_retry_ms,
            TickOutcome::FetchFailed | TickOutcome::Disconnected => {
                if self.session.is_some() {
                    self.settings.poll_interval_ms
                } else {
                    self.settings.reconnect_interval_ms
                }
            }
        };
        Duration::from_millis(ms)
    }

    fn on_failure(&mut self, err: &dyn Error) -> TickOutcome {
        self.failures = self.failures.saturating_add(1);

        if self.session.is_none() {
            debug!(error = %err, "Feed unavailable");
            return TickOutcome::FetchFailed;
        }

        if self.failures > self.settings.failure_threshold {
            warn!(failures = self.failures, error = %err, "Feed lost");
            self.disconnect();
            return TickOutcome::Disconnected;
        }

        debug!(failures = self.failures, error = %err, "Snapshot fetch failed");
        TickOutcome::FetchFailed
    }

    async fn connect(&mut self, snapshot: &MatchSnapshot) -> TickOutcome {
        let identity = match identity::establish(&self.feed, &self.shared, &self.events).await {
            Ok(identity) => identity,
            Err(err) => {
                debug!(error = %err, "Identity unresolved");
                return TickOutcome::IdentityUnresolved;
            }
        };

        // History before the connection is never replayed
        let cursor = snapshot.event_count();
        info!(cursor, game_time = snapshot.game_time, "Session started");

        self.session = Some(Session {
            identity,
            tracker: MatchTracker::new(),
            cursor,
        });
        TickOutcome::Connected
    }

    /// Fire due timers, then classify every new event in log order
    fn advance(&mut self, snapshot: &MatchSnapshot) -> Vec<Cue> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let now = snapshot.game_time;
        let mut cues = session.tracker.poll_timers(now);
        for decoded in snapshot.events_since(session.cursor) {
            match decoded {
                Ok(event) => cues.extend(self.classifier.classify(
                    &event,
                    now,
                    &session.identity,
                    &mut session.tracker,
                )),
                // The cursor moves past it below, so it is never seen again
                Err(err) => warn!(error = %err, "Skipping malformed event"),
            }
        }
        session.cursor = snapshot.event_count();
        cues
    }

    fn enqueue_all(&self, cues: Vec<Cue>) {
        if cues.is_empty() {
            return;
        }
        if self.shared.is_muted() {
            debug!(count = cues.len(), "Muted; dropping cues");
            return;
        }
        for cue in cues {
            debug!(%cue, "Enqueue");
            if self.cues.send(cue).is_err() {
                debug!("Cue queue closed");
                return;
            }
        }
    }

    fn disconnect(&mut self) {
        self.session = None;
        self.shared.set_connected(false);
        if self
            .events
            .send(CoreEvent::ConnectionStatus(ConnectionState::Disconnected))
            .is_err()
        {
            debug!("Status receiver closed");
        }
        info!("Session ended; match state cleared");
    }
}
