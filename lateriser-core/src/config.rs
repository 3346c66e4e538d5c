//! Controller Configuration
//!
//! Timing knobs for the controller. Every field has a default matching the
//! plug-in's historical behavior, so an empty JSON object is a valid
//! configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable timings for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LateriserConfig {
    /// Quiet period of the scroll and resize debouncers, in milliseconds.
    pub debounce_ms: u64,

    /// Delay before the artificial scroll event that follows an attach.
    pub initial_scroll_delay_ms: u64,

    /// Length of the fade-in transition carried by the hidden profile.
    pub fade_ms: u64,
}

impl LateriserConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn initial_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.initial_scroll_delay_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for LateriserConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            initial_scroll_delay_ms: 1,
            fade_ms: 400,
        }
    }
}
