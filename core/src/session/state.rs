use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rift_echo_types::Cue;
use tokio::sync::mpsc;

// ─────────────────────────────────────────────────────────────────────────────
// Connection State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Messages from the core to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    ConnectionStatus(ConnectionState),
}

pub type CoreEventSender = mpsc::UnboundedSender<CoreEvent>;
pub type CueSender = mpsc::UnboundedSender<Cue>;
pub type CueReceiver = mpsc::UnboundedReceiver<Cue>;

pub fn create_event_channel() -> (CoreEventSender, mpsc::UnboundedReceiver<CoreEvent>) {
    mpsc::unbounded_channel()
}

/// The pending cue queue. Unbounded: enqueue never blocks and never drops.
pub fn create_cue_channel() -> (CueSender, CueReceiver) {
    mpsc::unbounded_channel()
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared State
// ─────────────────────────────────────────────────────────────────────────────

/// Flags shared between the poll loop, the sequencer and the presentation layer.
///
/// Every field is a plain read or write; nothing here is transactional.
#[derive(Debug)]
pub struct SharedState {
    connected: AtomicBool,
    muted: AtomicBool,
    /// Volume level (0-100)
    volume: AtomicU8,
    voice_pack: RwLock<PathBuf>,
}

impl SharedState {
    pub fn new(voice_pack: PathBuf, volume: u8, muted: bool) -> Self {
        Self {
            connected: AtomicBool::new(false),
            muted: AtomicBool::new(muted),
            volume: AtomicU8::new(volume.min(100)),
            voice_pack: RwLock::new(voice_pack),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    pub fn volume(&self) -> u8 {
        self.volume.load(Ordering::SeqCst)
    }

    pub fn set_volume(&self, volume: u8) {
        self.volume.store(volume.min(100), Ordering::SeqCst);
    }

    pub fn voice_pack(&self) -> PathBuf {
        self.voice_pack
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_voice_pack(&self, path: &Path) {
        *self
            .voice_pack
            .write()
            .unwrap_or_else(PoisonError::into_inner) = path.to_path_buf();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stop Signal
// ─────────────────────────────────────────────────────────────────────────────

/// Cooperative cancellation, checked once per cycle by each periodic task
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
