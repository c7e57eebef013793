//! Logging setup shared by the desktop app and the CLI.
//!
//! Console output goes through `tracing_subscriber::fmt`. When a logs
//! directory is given, every event is also appended as one JSON object per
//! line:
//!
//! ```text
//! logs/
//! └── raw/
//!     └── 2026-10-18_desktop.jsonl
//! ```
//!
//! ```bash
//! # Failed verifications and deletes
//! jq 'select(.level == "error")' logs/raw/*.jsonl
//! ```

pub mod layer;

use std::path::Path;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub use layer::{read_records, JsonlLayer, LogRecord};

/// Default filter for a `-v` count.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
pub fn init(verbosity: u8, jsonl: Option<(&Path, &str)>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let jsonl_layer = match jsonl {
        Some((dir, session)) => Some(JsonlLayer::new(dir, session)?),
        None => None,
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(jsonl_layer)
        .try_init();

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "info");
        assert_eq!(verbosity_filter(2), "debug");
        assert_eq!(verbosity_filter(9), "trace");
    }
}
