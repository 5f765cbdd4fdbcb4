use colored::*;
use std::time::{SystemTime, UNIX_EPOCH};

/// Terminal UI utilities for watcher output
pub struct UI;

impl UI {
    /// Print a formatted status message
    pub fn status(message: &str) {
        println!(
            "{} {} {}",
            Self::timestamp().bright_black(),
            "●".bright_cyan(),
            message.bright_white()
        );
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!(
            "{} {} {}",
            Self::timestamp().bright_black(),
            "✗".red(),
            message.red()
        );
    }

    /// Print a file change notification
    pub fn file_changed(path: &str) {
        println!(
            "{} {} {} {}",
            Self::timestamp().bright_black(),
            "●".bright_yellow(),
            "File changed:".bright_white(),
            path.bright_cyan()
        );
    }

    /// Print a reload notification
    pub fn reloading(clients: usize) {
        println!(
            "{} {} {}",
            Self::timestamp().bright_black(),
            "↻".bright_magenta(),
            format!("Reloading {} client(s)...", clients).bright_white()
        );
    }

    /// Print watcher start banner
    pub fn watcher_start(watching: &str, port: u16) {
        println!(
            "\n{}",
            "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()
        );
        println!(
            "{} {}",
            "⚡".bright_cyan(),
            "Starting webmod watcher".bright_white().bold()
        );
        println!(
            "{} {}",
            "   Watching:".bright_black(),
            watching.bright_white()
        );
        println!(
            "{} {}",
            "   Reload socket:".bright_black(),
            format!("ws://127.0.0.1:{}", port).bright_white()
        );
        println!(
            "{} {}",
            "   Press".bright_black(),
            "Ctrl+C".bright_red().bold()
        );
        println!(
            "{}",
            "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()
        );
        println!();
    }

    /// Print watcher stop message
    pub fn watcher_stop() {
        println!(
            "\n{} {}",
            "■".bright_red(),
            "Stopping webmod watcher".bright_white().bold()
        );
    }

    /// Get formatted timestamp
    fn timestamp() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let time = now % 86400; // Seconds since midnight
        let hours = time / 3600;
        let minutes = (time % 3600) / 60;
        let seconds = time % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
