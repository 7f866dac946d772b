//! Runtime configuration read from the environment.

use std::env;

use crate::types::DEFAULT_FRAME_MS;

/// Game loop configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Piece RNG seed; `None` picks one at startup.
    pub seed: Option<u64>,
    /// Frame cadence of the scheduler loop.
    pub frame_ms: u32,
    /// Where to append JSON-lines session events.
    pub event_log_path: Option<String>,
    /// Minimum spacing between redraws of an unchanged frame.
    pub static_redraw_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: DEFAULT_FRAME_MS,
            event_log_path: None,
            static_redraw_ms: 250,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_SEED`: piece RNG seed
    /// - `BLOCKFALL_FRAME_MS`: frame cadence (ms, at least 1)
    /// - `BLOCKFALL_EVENT_LOG`: JSON-lines event log path
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());
        let frame_ms = non_empty("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.frame_ms);
        let event_log_path = non_empty("BLOCKFALL_EVENT_LOG");

        Self {
            seed,
            frame_ms,
            event_log_path,
            ..defaults
        }
    }
}
