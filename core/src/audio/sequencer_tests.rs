//! Tests for CueSequencer gating, mute handling and lookup misses

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rift_echo_types::{Cue, CueCategory, PlaybackSettings};
use tempfile::TempDir;

use super::{CueLookup, CuePlayer, CueSequencer, PlaybackError, StepOutcome};
use crate::session::{CueSender, SharedState, StopSignal, create_cue_channel};

// ═══════════════════════════════════════════════════════════════════════════
// Recording Player
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Play(PathBuf, f32),
    Pause,
    SetVolume(f32),
}

/// Records calls; fails like a real player when the file does not exist
struct RecordingPlayer {
    calls: Arc<Mutex<Vec<Call>>>,
    length: Option<Duration>,
}

impl RecordingPlayer {
    fn with_length(length: Option<Duration>) -> Self {
        Self {
            calls: Arc::default(),
            length,
        }
    }

    /// Shared handle that outlives a sequencer moved into `run`
    fn log(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn played(&self) -> Vec<PathBuf> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                Call::Play(path, _) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

impl CuePlayer for RecordingPlayer {
    fn play(&mut self, path: &Path, volume: f32) -> Result<Option<Duration>, PlaybackError> {
        if !path.exists() {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Play(path.to_path_buf(), volume));
        Ok(self.length)
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push(Call::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.lock().unwrap().push(Call::SetVolume(volume));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const SLACK: Duration = Duration::from_millis(150);
const DEFAULT_CLIP: Duration = Duration::from_millis(2000);

struct Harness {
    pack: TempDir,
    shared: Arc<SharedState>,
    tx: CueSender,
    sequencer: CueSequencer<RecordingPlayer>,
}

impl Harness {
    fn new(length: Option<Duration>) -> Self {
        let pack = tempfile::tempdir().unwrap();
        for file in ["kill.wav", "death.wav", "start.wav"] {
            std::fs::write(pack.path().join(file), b"RIFF").unwrap();
        }

        let mut lookup = CueLookup::default();
        lookup.insert(CueCategory::Player, "kill", "kill.wav");
        lookup.insert(CueCategory::Player, "death", "death.wav");
        lookup.insert(CueCategory::Global, "GameStart", "start.wav");
        lookup.insert(CueCategory::Team, "ally_slain", "missing.wav");

        let shared = Arc::new(SharedState::new(pack.path().to_path_buf(), 50, false));
        let (tx, rx) = create_cue_channel();
        let sequencer = CueSequencer::new(
            rx,
            lookup,
            RecordingPlayer::with_length(length),
            shared.clone(),
            PlaybackSettings::default(),
        );

        Self {
            pack,
            shared,
            tx,
            sequencer,
        }
    }

    fn enqueue(&self, cue: Cue) {
        self.tx.send(cue).unwrap();
    }

    fn clip(&self, file: &str) -> PathBuf {
        self.pack.path().join(file)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Gating
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn idle_when_queue_empty() {
    let mut h = Harness::new(None);
    assert_eq!(h.sequencer.step(Instant::now()), StepOutcome::Idle);
}

#[test]
fn second_clip_waits_for_length_plus_slack() {
    let length = Duration::from_millis(800);
    let mut h = Harness::new(Some(length));
    let t0 = Instant::now();

    h.enqueue(Cue::player("kill"));
    h.enqueue(Cue::player("death"));

    assert_eq!(h.sequencer.step(t0), StepOutcome::Played(Cue::player("kill")));
    assert_eq!(h.sequencer.busy_until(), Some(t0 + length + SLACK));

    assert_eq!(h.sequencer.step(t0 + length), StepOutcome::Gated);
    assert_eq!(
        h.sequencer.step(t0 + length + SLACK - Duration::from_millis(1)),
        StepOutcome::Gated
    );
    assert_eq!(
        h.sequencer.step(t0 + length + SLACK),
        StepOutcome::Played(Cue::player("death"))
    );
    assert_eq!(
        h.sequencer.player().played(),
        vec![h.clip("kill.wav"), h.clip("death.wav")]
    );
}

#[test]
fn unknown_length_uses_default_clip() {
    let mut h = Harness::new(None);
    let t0 = Instant::now();

    h.enqueue(Cue::global("GameStart"));
    h.sequencer.step(t0);
    assert_eq!(h.sequencer.busy_until(), Some(t0 + DEFAULT_CLIP + SLACK));
}

#[test]
fn unmapped_cue_is_a_silent_skip() {
    let mut h = Harness::new(None);
    let t0 = Instant::now();

    h.enqueue(Cue::team("enemy_slain"));
    h.enqueue(Cue::player("kill"));

    assert_eq!(
        h.sequencer.step(t0),
        StepOutcome::Skipped(Cue::team("enemy_slain"))
    );
    assert_eq!(h.sequencer.busy_until(), None);
    assert_eq!(h.sequencer.step(t0), StepOutcome::Played(Cue::player("kill")));
}

#[test]
fn missing_file_does_not_advance_gate() {
    let mut h = Harness::new(Some(Duration::from_secs(1)));
    let t0 = Instant::now();

    h.enqueue(Cue::team("ally_slain"));
    h.enqueue(Cue::player("kill"));

    assert_eq!(
        h.sequencer.step(t0),
        StepOutcome::Skipped(Cue::team("ally_slain"))
    );
    assert_eq!(h.sequencer.busy_until(), Some(t0));
    assert_eq!(h.sequencer.step(t0), StepOutcome::Played(Cue::player("kill")));
}

#[test]
fn voice_pack_swap_applies_to_next_clip() {
    let mut h = Harness::new(Some(Duration::ZERO));
    let other = tempfile::tempdir().unwrap();
    std::fs::write(other.path().join("kill.wav"), b"RIFF").unwrap();
    let t0 = Instant::now();

    h.shared.set_voice_pack(other.path());
    h.enqueue(Cue::player("kill"));
    h.sequencer.step(t0);

    assert_eq!(h.sequencer.player().played(), vec![other.path().join("kill.wav")]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mute and Volume
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mute_clears_queue_and_gate() {
    let mut h = Harness::new(Some(Duration::from_secs(3)));
    let t0 = Instant::now();

    h.enqueue(Cue::player("kill"));
    h.enqueue(Cue::player("death"));
    h.enqueue(Cue::global("GameStart"));
    h.sequencer.step(t0);

    h.shared.set_muted(true);
    assert_eq!(h.sequencer.step(t0), StepOutcome::Muted);
    assert_eq!(h.sequencer.busy_until(), None);
    assert!(h.sequencer.player().calls().contains(&Call::Pause));

    // Immediately drainable after unmute, with nothing left over
    h.shared.set_muted(false);
    assert_eq!(h.sequencer.step(t0), StepOutcome::Idle);
    h.enqueue(Cue::player("death"));
    assert_eq!(
        h.sequencer.step(t0),
        StepOutcome::Played(Cue::player("death"))
    );
}

#[test]
fn nothing_dequeued_while_muted() {
    let mut h = Harness::new(None);
    let t0 = Instant::now();
    h.shared.set_muted(true);
    h.sequencer.step(t0);

    h.enqueue(Cue::player("kill"));
    for _ in 0..3 {
        assert_eq!(h.sequencer.step(t0), StepOutcome::Muted);
    }
    assert!(h.sequencer.player().played().is_empty());
}

#[test]
fn volume_changes_reach_the_player() {
    let mut h = Harness::new(None);
    let t0 = Instant::now();

    h.shared.set_volume(80);
    h.enqueue(Cue::player("kill"));
    h.sequencer.step(t0);

    assert_eq!(
        h.sequencer.player().calls(),
        vec![
            Call::SetVolume(0.8),
            Call::Play(h.clip("kill.wav"), 0.8)
        ]
    );

    // Unchanged volume is not re-sent
    h.sequencer.step(t0);
    assert_eq!(h.sequencer.player().calls().len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Background Loop
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn run_plays_queued_cues_until_stopped() {
    let h = Harness::new(Some(Duration::ZERO));
    let kill = h.clip("kill.wav");
    let calls = h.sequencer.player().log();
    h.enqueue(Cue::player("kill"));

    let stop = StopSignal::default();
    let task = tokio::spawn(h.sequencer.run(stop.clone()));

    for _ in 0..200 {
        if calls.lock().unwrap().iter().any(|c| matches!(c, Call::Play(..))) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    stop.stop();
    task.await.unwrap();

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.first(), Some(&Call::Play(kill, 0.5)));
    assert_eq!(calls.last(), Some(&Call::Pause));
}
