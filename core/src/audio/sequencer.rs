//! Cue sequencer: drains the cue queue one clip at a time
//!
//! A cue is only dequeued once the previous clip's gate has passed. The gate
//! is the clip start plus its length (or a default when unknown) plus a
//! short slack, so clips never overlap.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rift_echo_types::{Cue, PlaybackSettings};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::session::{CueReceiver, SharedState, StopSignal};

use super::lookup::CueLookup;
use super::player::CuePlayer;

/// What one drain step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Queue empty
    Idle,
    /// Previous clip still within its gate
    Gated,
    Muted,
    Played(Cue),
    /// Dequeued but nothing was played (no mapping or missing file)
    Skipped(Cue),
}

pub struct CueSequencer<P: CuePlayer> {
    queue: CueReceiver,
    lookup: CueLookup,
    player: P,
    shared: Arc<SharedState>,
    settings: PlaybackSettings,
    /// No cue is dequeued before this instant
    busy_until: Option<Instant>,
    was_muted: bool,
    /// Last volume pushed to the player
    volume: u8,
}

impl<P: CuePlayer> CueSequencer<P> {
    pub fn new(
        queue: CueReceiver,
        lookup: CueLookup,
        player: P,
        shared: Arc<SharedState>,
        settings: PlaybackSettings,
    ) -> Self {
        let volume = shared.volume();
        Self {
            queue,
            lookup,
            player,
            shared,
            settings,
            busy_until: None,
            was_muted: false,
            volume,
        }
    }

    pub fn busy_until(&self) -> Option<Instant> {
        self.busy_until
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Drain at a fixed cadence until `stop` is raised.
    ///
    /// Each step runs on the blocking pool, since starting a clip opens and
    /// decodes a file.
    pub async fn run(self, stop: StopSignal)
    where
        P: 'static,
    {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.settings.drain_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            drain_ms = self.settings.drain_interval_ms,
            cues = self.lookup.len(),
            "Cue sequencer started"
        );

        let mut sequencer = self;
        while !stop.is_stopped() {
            interval.tick().await;
            let step = tokio::task::spawn_blocking(move || {
                let mut sequencer = sequencer;
                sequencer.step(Instant::now());
                sequencer
            });
            sequencer = match step.await {
                Ok(sequencer) => sequencer,
                Err(err) => {
                    warn!(error = %err, "Drain step panicked; sequencer stopped");
                    return;
                }
            };
        }

        sequencer.player.pause();
        info!("Cue sequencer stopped");
    }

    /// One drain step at `now`
    pub fn step(&mut self, now: Instant) -> StepOutcome {
        self.sync_volume();

        if self.shared.is_muted() {
            if !self.was_muted {
                self.on_mute();
            }
            return StepOutcome::Muted;
        }
        if self.was_muted {
            debug!("Unmuted");
            self.was_muted = false;
        }

        if let Some(until) = self.busy_until
            && now < until
        {
            return StepOutcome::Gated;
        }

        let Ok(cue) = self.queue.try_recv() else {
            return StepOutcome::Idle;
        };

        let Some(file) = self.lookup.resolve(&cue) else {
            debug!(%cue, "No clip mapped");
            return StepOutcome::Skipped(cue);
        };
        let path = self.shared.voice_pack().join(file);

        match self.player.play(&path, percent(self.volume)) {
            Ok(length) => {
                let length = length
                    .unwrap_or_else(|| Duration::from_millis(self.settings.default_clip_ms));
                let gate = length + Duration::from_millis(self.settings.gate_slack_ms);
                debug!(%cue, path = %path.display(), ?length, "Playing");
                self.busy_until = Some(now + gate);
                StepOutcome::Played(cue)
            }
            Err(err) => {
                warn!(%cue, error = %err, "Skipping cue");
                self.busy_until = Some(now);
                StepOutcome::Skipped(cue)
            }
        }
    }

    /// Drop everything pending and silence the current clip
    fn on_mute(&mut self) {
        self.was_muted = true;
        let mut dropped = 0usize;
        while self.queue.try_recv().is_ok() {
            dropped += 1;
        }
        self.busy_until = None;
        self.player.pause();
        info!(dropped, "Muted");
    }

    fn sync_volume(&mut self) {
        let volume = self.shared.volume();
        if volume != self.volume {
            self.volume = volume;
            self.player.set_volume(percent(volume));
        }
    }
}

fn percent(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0
}
