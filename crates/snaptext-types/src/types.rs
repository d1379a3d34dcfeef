use crate::region::Point;

/// Requests handled by the capture engine, in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Select a region with the pointer, remember it and capture it
    CaptureInteractive,
    /// Capture the most recently selected region again
    CaptureLast,
    /// Start or stop continuous capture of the most recent region
    TogglePoll,
    /// Send the current text to the translation service
    Translate,
}

/// Events sent from the engine to the UI
#[derive(Debug, Clone)]
pub enum AppEvent {
    ShowText {
        text: String,
        source: TextSource,
    },
    StatusUpdate {
        status: String,
        polling: bool,
    },
    BackendReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Capture,
    Poll,
    Translation,
}

/// Pointer input observed while a selection is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Moved(Point),
    PrimaryDown(Point),
    PrimaryUp(Point),
    /// Give up on the current selection
    Abort,
}

/// RGBA8 pixels of a captured region
#[derive(Clone)]
pub struct RawImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for RawImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
