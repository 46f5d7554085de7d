//! Prompt commands
//!
//! Each input line is split with shlex and parsed as a clap subcommand.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rift_echo_core::session::{CoreEvent, CueSender};
use rift_echo_core::{AppConfig, AppConfigExt, Cue, CueCategory, SharedState};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

#[derive(Parser)]
#[command(about = "rift-echo console")]
struct Console {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Silence announcements and drop anything pending
    Mute,
    Unmute,
    /// Set playback volume (0-100)
    Volume {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        level: u8,
    },
    /// Switch to another voice pack under the assets directory
    Pack {
        #[arg(short, long)]
        name: String,
    },
    /// Queue one cue directly
    Test {
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        key: String,
    },
    Status,
    Exit,
}

/// State the prompt commands act on
pub struct CommandContext {
    pub config: AppConfig,
    pub shared: Arc<SharedState>,
    pub cues: CueSender,
}

impl CommandContext {
    /// Fold runtime changes back into the config for saving
    pub fn sync_config(&mut self) {
        self.config.audio.volume = self.shared.volume();
        self.config.audio.muted = self.shared.is_muted();
    }
}

/// Run one prompt line. Returns `Ok(true)` when the user asked to exit.
pub fn respond(line: &str, ctx: &mut CommandContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "rift-echo".to_string());
    let console = Console::try_parse_from(args).map_err(|e| e.to_string())?;

    match console.command {
        Some(Commands::Mute) => {
            ctx.shared.set_muted(true);
            println!("muted");
        }
        Some(Commands::Unmute) => {
            ctx.shared.set_muted(false);
            println!("unmuted");
        }
        Some(Commands::Volume { level }) => {
            ctx.shared.set_volume(level);
            println!("volume {level}");
        }
        Some(Commands::Pack { name }) => set_pack(ctx, name)?,
        Some(Commands::Test { category, key }) => {
            let category = CueCategory::parse(&category)
                .ok_or_else(|| format!("unknown category '{category}'"))?;
            let cue = Cue::new(category, key);
            if ctx.shared.is_muted() {
                println!("muted; {cue} will play after unmute");
            }
            ctx.cues
                .send(cue)
                .map_err(|_| "cue queue closed".to_string())?;
        }
        Some(Commands::Status) => show_status(ctx),
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

fn set_pack(ctx: &mut CommandContext, name: String) -> Result<(), String> {
    let path = PathBuf::from(&ctx.config.assets_dir).join(&name);
    if !path.is_dir() {
        return Err(format!("no voice pack at {}", path.display()));
    }
    ctx.shared.set_voice_pack(&path);
    info!(pack = %name, "Voice pack changed");
    ctx.config.voice_pack = name;
    Ok(())
}

fn show_status(ctx: &CommandContext) {
    let connected = if ctx.shared.is_connected() {
        "connected"
    } else {
        "disconnected"
    };
    println!("feed:   {connected} ({})", ctx.config.feed.base_url);
    println!("pack:   {}", ctx.shared.voice_pack().display());
    println!("volume: {}", ctx.shared.volume());
    println!("muted:  {}", ctx.shared.is_muted());
    println!("cues:   {}", ctx.config.cue_table_path().display());
}

/// Print connection status changes as they arrive
pub async fn report_status(mut events: UnboundedReceiver<CoreEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            CoreEvent::ConnectionStatus(state) if state.is_connected() => println!("CONNECTED"),
            CoreEvent::ConnectionStatus(_) => println!("DISCONNECTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rift_echo_core::create_cue_channel;

    fn context() -> (CommandContext, rift_echo_core::session::CueReceiver) {
        let config = AppConfig::default();
        let shared = Arc::new(SharedState::new(config.voice_pack_path(), 50, false));
        let (cues, rx) = create_cue_channel();
        (
            CommandContext {
                config,
                shared,
                cues,
            },
            rx,
        )
    }

    #[test]
    fn mute_and_volume_update_shared_state() {
        let (mut ctx, _rx) = context();
        assert!(!respond("mute", &mut ctx).unwrap());
        assert!(ctx.shared.is_muted());
        respond("volume --level 80", &mut ctx).unwrap();
        assert_eq!(ctx.shared.volume(), 80);
        assert!(respond("volume --level 120", &mut ctx).is_err());

        ctx.sync_config();
        assert_eq!(ctx.config.audio.volume, 80);
        assert!(ctx.config.audio.muted);
    }

    #[test]
    fn test_command_enqueues_cue() {
        let (mut ctx, mut rx) = context();
        respond("test --category player --key kill", &mut ctx).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Cue::player("kill"));
        assert!(respond("test -c announcer -k kill", &mut ctx).is_err());
    }

    #[test]
    fn pack_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Arcade")).unwrap();
        let (mut ctx, _rx) = context();
        ctx.config.assets_dir = dir.path().display().to_string();

        assert!(respond("pack --name Missing", &mut ctx).is_err());
        respond("pack --name Arcade", &mut ctx).unwrap();
        assert_eq!(ctx.shared.voice_pack(), dir.path().join("Arcade"));
        assert_eq!(ctx.config.voice_pack, "Arcade");
    }

    #[test]
    fn exit_and_bad_quoting() {
        let (mut ctx, _rx) = context();
        assert!(respond("exit", &mut ctx).unwrap());
        assert!(respond("pack --name \"unterminated", &mut ctx).is_err());
    }
}
