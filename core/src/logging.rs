//! Status logging.
//!
//! A single colored, timestamped line per status transition: white for
//! progress, green for positive results, red for errors.

use chrono::Local;
use colored::Colorize;

/// The color a status line is printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Routine progress.
    White,
    /// A positive result.
    Green,
    /// An error.
    Red,
}

/// Prints `message` prefixed with a `[HH:MM:SS]` timestamp, colored per
/// `level`.
pub fn log_status(level: Level, message: &str) {
    let timestamp = Local::now().format("%H:%M:%S");
    let colored_message = match level {
        Level::White => message.normal(),
        Level::Green => message.green(),
        Level::Red => message.red(),
    };
    println!("[{timestamp}] {colored_message}");
}
