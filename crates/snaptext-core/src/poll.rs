use std::time::Duration;

use snaptext_types::TextSource;

use crate::engine::CaptureEngine;
use crate::error::EngineError;
use crate::sink::TextSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Running,
}

/// Continuous capture of the most recent region.
///
/// Only text that differs from the previous tick is published. The
/// owner schedules ticks; this type only holds the state and runs one
/// tick at a time.
pub struct PollLoop {
    state: PollState,
    last_text: String,
    interval: Duration,
}

impl PollLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PollState::Idle,
            last_text: String::new(),
            interval,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PollState::Running
    }

    /// Delay between the end of one tick and the start of the next
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Flip between idle and running.
    ///
    /// Starting needs a region to capture, so it is a no-op while
    /// `history_ready` is false.
    pub fn toggle(&mut self, history_ready: bool) -> PollState {
        self.state = match self.state {
            PollState::Idle if history_ready => {
                self.last_text.clear();
                tracing::info!("[POLL] Started, every {:?}", self.interval);
                PollState::Running
            }
            PollState::Idle => {
                tracing::debug!("[POLL] Nothing to poll yet");
                PollState::Idle
            }
            PollState::Running => {
                tracing::info!("[POLL] Stopped");
                PollState::Idle
            }
        };
        self.state
    }

    pub fn stop(&mut self) {
        self.state = PollState::Idle;
    }

    /// Capture once and publish the text if it changed.
    ///
    /// Returns the published text.
    pub async fn tick(
        &mut self,
        engine: &CaptureEngine,
        sink: &dyn TextSink,
    ) -> Result<Option<String>, EngineError> {
        if !self.is_running() {
            return Ok(None);
        }

        let Some(text) = engine.capture_last_region().await? else {
            return Ok(None);
        };

        if text == self.last_text {
            tracing::trace!("[POLL] Text unchanged");
            return Ok(None);
        }

        tracing::debug!("[POLL] Text changed: {} chars", text.chars().count());
        self.last_text.clone_from(&text);
        sink.publish(text.clone(), TextSource::Poll).await;
        Ok(Some(text))
    }
}
