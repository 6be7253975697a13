//! Logging utilities for psiconnect.
//!
//! All crates log through `tracing`; this module installs the subscriber once
//! at program start.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` wins when set; otherwise every target logs at `level`.
/// Calling this twice is harmless, the second call is ignored.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize from a textual level such as the `logging.level` config key.
///
/// Unknown names fall back to INFO.
pub fn init_from_str(level: &str) {
    init_with_level(parse_level(level));
}

/// Maps a level name to a [`Level`], defaulting to INFO.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::INFO)
}
