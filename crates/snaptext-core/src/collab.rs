//! Interfaces to the platform pieces the engine drives but does not own.

use std::sync::Arc;

use kanal::AsyncReceiver;
use snaptext_types::{Point, PointerEvent, RawImage, Region};

/// Transparent full-screen surface showing the selection in progress
pub trait Overlay: Send + Sync {
    fn draw_rect(&self, from: Point, to: Point);

    fn clear_rect(&self);

    /// Let the surface repaint and process its own events
    fn refresh(&self);
}

pub trait Pointer: Send + Sync {
    /// Current cursor position in screen pixels
    fn position(&self) -> Point;
}

/// Screenshot primitive. Blocking.
pub trait Snapshot: Send + Sync {
    fn capture(&self, region: Region) -> anyhow::Result<RawImage>;
}

/// OCR engine. Blocking.
pub trait Recognizer: Send + Sync {
    /// Raw engine output, before any cleanup
    fn recognize(&self, image: &RawImage, language: &str) -> anyhow::Result<String>;
}

/// Everything a [`CaptureEngine`](crate::CaptureEngine) talks to
pub struct Collaborators {
    pub snapshot: Arc<dyn Snapshot>,
    pub recognizer: Arc<dyn Recognizer>,
    pub overlay: Arc<dyn Overlay>,
    pub pointer: Arc<dyn Pointer>,
    pub pointer_events: AsyncReceiver<PointerEvent>,
}
