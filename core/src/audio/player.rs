//! Clip playback
//!
//! [`RodioPlayer`] keeps the output stream on a dedicated thread, since the
//! stream cannot leave the thread that opened it. Clips are opened and
//! decoded on the caller's side so failures and durations are known
//! synchronously; only the decoded source crosses to the audio thread.
//! [`CuePlayer::play`] blocks on file I/O and must not run on an async worker.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, warn};

use super::error::PlaybackError;

/// Something that can play one clip at a time
pub trait CuePlayer: Send {
    /// Start `path`, replacing whatever is playing.
    /// Returns the clip length when the format reports one.
    fn play(&mut self, path: &Path, volume: f32) -> Result<Option<Duration>, PlaybackError>;

    /// Silence the in-flight clip, if any
    fn pause(&mut self);

    /// Applies to the in-flight clip and to later ones
    fn set_volume(&mut self, volume: f32);
}

enum AudioCommand {
    Play {
        source: Decoder<BufReader<File>>,
        volume: f32,
    },
    Pause,
    SetVolume(f32),
}

pub struct RodioPlayer {
    tx: Sender<AudioCommand>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCommand>();

        thread::spawn(move || {
            let mut output = OutputStream::try_default().ok();
            if output.is_none() {
                warn!("Audio output unavailable; cues are silent until a device appears");
            }
            let mut current: Option<Sink> = None;

            while let Ok(command) = rx.recv() {
                match command {
                    AudioCommand::Play { source, volume } => {
                        if let Some(sink) = current.take() {
                            sink.stop();
                        }

                        if output.is_none() {
                            output = OutputStream::try_default().ok();
                        }
                        let Some((_, handle)) = output.as_ref() else {
                            continue;
                        };

                        match Sink::try_new(handle) {
                            Ok(sink) => {
                                sink.set_volume(volume);
                                sink.append(source);
                                current = Some(sink);
                            }
                            Err(err) => {
                                warn!(?err, "Failed to create audio sink");
                                output = None;
                            }
                        }
                    }
                    AudioCommand::Pause => {
                        if let Some(sink) = current.take() {
                            sink.stop();
                        }
                    }
                    AudioCommand::SetVolume(volume) => {
                        if let Some(sink) = current.as_ref() {
                            sink.set_volume(volume);
                        }
                    }
                }
            }
            debug!("Audio thread exiting");
        });

        Self { tx }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer for RodioPlayer {
    fn play(&mut self, path: &Path, volume: f32) -> Result<Option<Duration>, PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let duration = source.total_duration();

        self.tx
            .send(AudioCommand::Play { source, volume })
            .map_err(|_| PlaybackError::OutputClosed)?;
        Ok(duration)
    }

    fn pause(&mut self) {
        let _ = self.tx.send(AudioCommand::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(AudioCommand::SetVolume(volume));
    }
}
