mod commands;
mod logging;
mod repl;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use rift_echo_core::audio::{CueLookup, CueSequencer, RodioPlayer};
use rift_echo_core::{
    AppConfig, AppConfigExt, FeedClient, PollLoop, SharedState, StopSignal, create_cue_channel,
    create_event_channel,
};
use tracing::{info, warn};

use commands::CommandContext;

/// Live match announcer
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the live match feed
    #[arg(long)]
    feed_url: Option<String>,
    /// Directory holding voice packs and the cue table
    #[arg(long)]
    assets: Option<String>,
    /// Voice pack directory name under the assets directory
    #[arg(long)]
    pack: Option<String>,
    /// Cue table file name under the assets directory
    #[arg(long)]
    cue_table: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,
    #[arg(long)]
    muted: bool,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(url) = self.feed_url {
            config.feed.base_url = url;
        }
        if let Some(assets) = self.assets {
            config.assets_dir = assets;
        }
        if let Some(pack) = self.pack {
            config.voice_pack = pack;
        }
        if let Some(table) = self.cue_table {
            config.cue_table = table;
        }
        if let Some(volume) = self.volume {
            config.audio.volume = volume;
        }
        if self.muted {
            config.audio.muted = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut config = AppConfig::load();
    args.apply(&mut config);

    let shared = Arc::new(SharedState::new(
        config.voice_pack_path(),
        config.audio.volume,
        config.audio.muted,
    ));
    let stop = StopSignal::default();
    let (events_tx, events_rx) = create_event_channel();
    let (cues_tx, cues_rx) = create_cue_channel();

    let feed = FeedClient::new(&config.feed).map_err(|e| e.to_string())?;
    let lookup = CueLookup::load_or_empty(&config.cue_table_path());

    let poll = PollLoop::new(
        feed,
        config.feed.clone(),
        Arc::clone(&shared),
        events_tx,
        cues_tx.clone(),
    );
    let sequencer = CueSequencer::new(
        cues_rx,
        lookup,
        RodioPlayer::new(),
        Arc::clone(&shared),
        config.playback.clone(),
    );

    info!(
        feed = %config.feed.base_url,
        pack = %config.voice_pack_path().display(),
        "Starting announcer"
    );
    let poll_task = tokio::spawn(poll.run(stop.clone()));
    let sequencer_task = tokio::spawn(sequencer.run(stop.clone()));
    let status_task = tokio::spawn(commands::report_status(events_rx));

    let mut ctx = CommandContext {
        config,
        shared,
        cues: cues_tx,
    };
    let mut lines = repl::spawn_reader();

    loop {
        repl::prompt()?;
        let line = tokio::select! {
            line = lines.recv() => match line {
                Some(line) => line,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match commands::respond(line, &mut ctx) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    stop.stop();
    if let Err(e) = poll_task.await {
        warn!(error = %e, "Poll loop task failed");
    }
    if let Err(e) = sequencer_task.await {
        warn!(error = %e, "Sequencer task failed");
    }
    status_task.abort();

    ctx.sync_config();
    if let Err(e) = ctx.config.save() {
        warn!(error = %e, "Failed to save configuration");
    }
    info!("Shut down");
    Ok(())
}
