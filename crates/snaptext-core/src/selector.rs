use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use snaptext_types::{Point, PointerEvent, Region};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::collab::{Overlay, Pointer};
use crate::error::EngineError;

/// Selection in progress: fixed start, moving end
#[derive(Debug, Clone, Copy)]
struct CaptureSession {
    start: Point,
    current: Point,
}

/// Turns pointer input into a finalized [`Region`].
///
/// The selection starts at the cursor position when [`select_region`]
/// is called and ends on the next primary button press.
///
/// [`select_region`]: RegionSelector::select_region
pub struct RegionSelector {
    overlay: Arc<dyn Overlay>,
    pointer: Arc<dyn Pointer>,
    events: AsyncReceiver<PointerEvent>,
    tick: Duration,
    timeout: Option<Duration>,
}

impl RegionSelector {
    pub fn new(
        overlay: Arc<dyn Overlay>,
        pointer: Arc<dyn Pointer>,
        events: AsyncReceiver<PointerEvent>,
        tick: Duration,
    ) -> Self {
        Self {
            overlay,
            pointer,
            events,
            tick,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn select_region(&self, cancel: &CancellationToken) -> Result<Region, EngineError> {
        self.drain_stale_events();

        let start = self.pointer.position();
        tracing::debug!("[SELECT] Started at ({}, {})", start.x, start.y);

        let session = CaptureSession {
            start,
            current: start,
        };
        self.overlay.draw_rect(session.start, session.current);

        let result = self.track(session, cancel).await;

        self.overlay.clear_rect();
        self.overlay.refresh();

        match &result {
            Ok(region) => tracing::info!("[SELECT] Selected {}", region),
            Err(e) => tracing::debug!("[SELECT] Ended without region: {}", e),
        }
        result
    }

    async fn track(
        &self,
        mut session: CaptureSession,
        cancel: &CancellationToken,
    ) -> Result<Region, EngineError> {
        let mut redraw = tokio::time::interval(self.tick);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(expired);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Err(EngineError::SelectionAborted),
                _ = &mut expired => {
                    return Err(EngineError::SelectionTimedOut(self.timeout.unwrap_or_default()));
                }
                event = self.events.recv() => {
                    match event.map_err(|_| EngineError::PointerClosed)? {
                        PointerEvent::Moved(position) => {
                            session.current = position;
                            self.overlay.draw_rect(session.start, session.current);
                        }
                        PointerEvent::PrimaryDown(position) => {
                            session.current = position;
                            return Ok(Region::from_drag(session.start, session.current)?);
                        }
                        PointerEvent::PrimaryUp(_) => {}
                        PointerEvent::Abort => return Err(EngineError::SelectionAborted),
                    }
                }
                _ = redraw.tick() => self.overlay.refresh(),
            }
        }
    }

    /// Input queued while no selection was running must not end this one
    fn drain_stale_events(&self) {
        let mut dropped = 0usize;
        while let Ok(Some(_)) = self.events.try_recv() {
            dropped += 1;
        }

        if dropped > 0 {
            tracing::trace!("[SELECT] Dropped {} stale pointer events", dropped);
        }
    }
}
