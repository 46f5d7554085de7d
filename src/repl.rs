use std::io::{self, BufRead, Write};
use std::thread;

use tokio::sync::mpsc;

/// Read stdin lines on a dedicated thread.
///
/// The channel closes at end of input, so the prompt loop can race it
/// against Ctrl-C instead of blocking on stdin.
pub fn spawn_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn prompt() -> Result<(), String> {
    write!(io::stdout(), "$ ").map_err(|e| e.to_string())?;
    io::stdout().flush().map_err(|e| e.to_string())
}
