use std::time::Duration;

use serde::{Deserialize, Serialize};
use snaptext_types::Region;

fn default_history_capacity() -> usize {
    10
}

fn default_selection_tick_ms() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Number of selected regions remembered
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Overlay redraw period while a selection is in progress
    #[serde(default = "default_selection_tick_ms")]
    pub selection_tick_ms: u64,
    /// Delay between continuous captures
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give up on a selection after this long
    pub selection_timeout_ms: Option<u64>,
    /// Region preloaded into the history, so polling works before any selection
    pub initial_region: Option<Region>,
}

impl CaptureConfig {
    pub fn selection_tick(&self) -> Duration {
        Duration::from_millis(self.selection_tick_ms.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn selection_timeout(&self) -> Option<Duration> {
        self.selection_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            selection_tick_ms: default_selection_tick_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            selection_timeout_ms: None,
            initial_region: None,
        }
    }
}
