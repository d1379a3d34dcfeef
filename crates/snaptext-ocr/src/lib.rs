//! Platform collaborators: screen capture, OCR backends, pointer input and
//! global hotkeys.

mod capture;
mod hotkey;
mod pointer;
mod preprocess;
mod tesseract;
#[cfg(windows)]
mod windows_ocr;

use std::sync::Arc;

use anyhow::Result;
use snaptext_config::ocr::{OcrBackend, OcrConfig};
use snaptext_core::Recognizer;

pub use capture::{XcapSnapshot, capture_screen_region};
pub use hotkey::{HotkeyManager, parse_bindings};
pub use pointer::{DevicePointer, PointerListener, listen};
pub use preprocess::{binarize, binarized_png, otsu_level};
pub use tesseract::TesseractRecognizer;
#[cfg(windows)]
pub use windows_ocr::{ComGuard, WindowsRecognizer};

/// Build the recognizer selected in config
pub fn recognizer_for(config: &OcrConfig) -> Result<Arc<dyn Recognizer>> {
    match config.backend {
        OcrBackend::Tesseract => {
            let recognizer = TesseractRecognizer::new(config.psm);
            match recognizer.missing_languages(&config.language) {
                Ok(missing) if !missing.is_empty() => {
                    tracing::warn!(
                        "Tesseract has no trained data for {}",
                        missing.join(", ")
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Could not list tesseract languages: {:#}", e),
            }
            Ok(Arc::new(recognizer))
        }
        #[cfg(windows)]
        OcrBackend::Windows => Ok(Arc::new(WindowsRecognizer)),
        #[cfg(not(windows))]
        OcrBackend::Windows => anyhow::bail!("The windows OCR backend is only available on Windows"),
    }
}
