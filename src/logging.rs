//! Logging setup: stdout plus a size-rotated log file.
//!
//! Logs go to `~/.config/rift-echo/rift-echo.log` (or the platform
//! equivalent), rotated at 10 MB. Set `DEBUG_LOGGING=1` to enable debug
//! output for the announcer crates.

use std::path::Path;

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE: &str = "rift-echo.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Initialize logging.
///
/// The returned guard flushes the file writer on drop and must be held
/// until shutdown. Returns `None` when only stdout logging could be set up.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|dir| dir.join("rift-echo")) else {
        init_stdout_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber not installed yet
        eprintln!(
            "Failed to create log directory {}: {e}, using stdout only",
            log_dir.display()
        );
        init_stdout_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE);
    let guard = match init_with_file(&log_path, debug_logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to open log file {}: {e}", log_path.display());
            init_stdout_only(debug_logging);
            return None;
        }
    };

    tracing::info!(log_file = %log_path.display(), debug_logging, "Logging initialized");
    Some(guard)
}

fn init_with_file(log_path: &Path, debug_logging: bool) -> std::io::Result<WorkerGuard> {
    // Keep rift-echo.log and rift-echo.log.1
    let appender = BasicRollingFileAppender::new(
        log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_BYTES),
        1,
    )?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(filter(debug_logging))
        .init();

    Ok(guard)
}

fn init_stdout_only(debug_logging: bool) {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(debug_logging, "Logging initialized (stdout only)");
}

fn filter(debug_logging: bool) -> EnvFilter {
    EnvFilter::new(if debug_logging {
        "info,rift_echo=debug,rift_echo_core=debug"
    } else {
        "info"
    })
}
