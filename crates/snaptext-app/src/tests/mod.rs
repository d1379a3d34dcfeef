use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::AsyncSender;
use snaptext_core::{Collaborators, Overlay, Pointer, Recognizer, Snapshot};
use snaptext_types::{Point, PointerEvent, RawImage, Region};


pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Writer the test can read back after handing it to a task
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct BlankSnapshot;

impl Snapshot for BlankSnapshot {
    fn capture(&self, region: Region) -> anyhow::Result<RawImage> {
        Ok(RawImage {
            data: vec![255; (region.width() * region.height() * 4) as usize],
            width: region.width(),
            height: region.height(),
        })
    }
}

/// Returns the same raw output for every image
pub struct FixedRecognizer(pub &'static str);

impl Recognizer for FixedRecognizer {
    fn recognize(&self, _image: &RawImage, _language: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

pub struct NullOverlay;

impl Overlay for NullOverlay {
    fn draw_rect(&self, _from: Point, _to: Point) {}

    fn clear_rect(&self) {}

    fn refresh(&self) {}
}

pub struct FixedPointer;

impl Pointer for FixedPointer {
    fn position(&self) -> Point {
        Point::new(0, 0)
    }
}

/// Collaborators that never touch the screen; keep the sender alive
pub fn fake_collaborators(raw_text: &'static str) -> (Collaborators, AsyncSender<PointerEvent>) {
    let (pointer_tx, pointer_rx) = kanal::unbounded_async();
    let collaborators = Collaborators {
        snapshot: Arc::new(BlankSnapshot),
        recognizer: Arc::new(FixedRecognizer(raw_text)),
        overlay: Arc::new(NullOverlay),
        pointer: Arc::new(FixedPointer),
        pointer_events: pointer_rx,
    };
    (collaborators, pointer_tx)
}

pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("snaptext-{}-{}", std::process::id(), name))
}
