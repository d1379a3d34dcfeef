use anyhow::{Context, Result};
use snaptext_core::Recognizer;
use snaptext_types::RawImage;
use windows::{
    Globalization::Language,
    Graphics::Imaging::BitmapDecoder,
    Media::Ocr::OcrEngine as WinOcrEngine,
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    core::HSTRING,
};

use crate::preprocess::binarized_png;

/// COM stays initialized on the current thread while this lives
pub struct ComGuard;

impl ComGuard {
    pub fn initialize() -> Result<Self> {
        unsafe {
            windows::Win32::System::Com::CoInitializeEx(
                None,
                windows::Win32::System::Com::COINIT_MULTITHREADED,
            )
            .ok()
            .with_context(|| "Failed to initialize COM")?;
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            windows::Win32::System::Com::CoUninitialize();
        }
    }
}

/// OCR through Windows.Media.Ocr.
///
/// Takes BCP-47 tags (`ja`, `en-US`) rather than tesseract names.
pub struct WindowsRecognizer;

impl WindowsRecognizer {
    fn engine(language_code: &str) -> Result<WinOcrEngine> {
        let language = Language::CreateLanguage(&HSTRING::from(language_code))
            .context("Failed to create language")?;

        WinOcrEngine::TryCreateFromLanguage(&language)
            .context("Failed to create OCR engine for language")
    }
}

impl Recognizer for WindowsRecognizer {
    fn recognize(&self, image: &RawImage, language: &str) -> Result<String> {
        let _com = ComGuard::initialize()?;
        let engine = Self::engine(language)?;
        let image_bytes = binarized_png(image)?;

        // Create in-memory stream from image bytes
        let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
        let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

        writer
            .WriteBytes(&image_bytes)
            .context("Failed to write image bytes")?;
        writer
            .StoreAsync()
            .context("Failed to store async")?
            .get()
            .context("Failed to store data")?;
        writer.FlushAsync().context("Failed to flush")?.get()?;

        stream.Seek(0).context("Failed to seek")?;

        let decoder = BitmapDecoder::CreateAsync(&stream)
            .context("Failed to create decoder async")?
            .get()
            .context("Failed to get decoder")?;

        let bitmap = decoder
            .GetSoftwareBitmapAsync()
            .context("Failed to get bitmap async")?
            .get()
            .context("Failed to get software bitmap")?;

        let result = engine
            .RecognizeAsync(&bitmap)
            .context("Failed to recognize async")?
            .get()
            .context("Failed to get OCR result")?;

        // keep the trailing-newline contract of the tesseract backend
        let mut text = result.Text().context("Failed to get text")?.to_string();
        text.push('\n');
        Ok(text)
    }
}
