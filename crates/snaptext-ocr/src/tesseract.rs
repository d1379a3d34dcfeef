use std::io::Write;

use anyhow::{Context, Result};
use rusty_tesseract::{Args, Image};
use snaptext_core::Recognizer;
use snaptext_types::RawImage;

use crate::preprocess::binarized_png;

/// OCR through the tesseract engine found on `PATH`
#[derive(Debug, Clone, Default)]
pub struct TesseractRecognizer {
    psm: Option<i32>,
}

impl TesseractRecognizer {
    pub fn new(psm: Option<i32>) -> Self {
        Self { psm }
    }

    /// Languages with trained data installed
    pub fn available_languages(&self) -> Result<Vec<String>> {
        rusty_tesseract::get_tesseract_langs().context("Failed to list tesseract languages")
    }

    /// Components of `language` (e.g. `jpn+jpn_vert`) that are not installed
    pub fn missing_languages(&self, language: &str) -> Result<Vec<String>> {
        Ok(missing_from(language, &self.available_languages()?))
    }

    fn args(&self, language: &str) -> Args {
        let defaults = Args::default();
        Args {
            lang: language.to_string(),
            psm: self.psm.or(defaults.psm),
            ..defaults
        }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &RawImage, language: &str) -> Result<String> {
        let png = binarized_png(image)?;

        // tesseract reads from a file; keep it until recognition is done
        let mut file = tempfile::Builder::new()
            .prefix("snaptext-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image")?;
        file.write_all(&png)
            .context("Failed to write temporary image")?;
        file.flush()?;

        let input = Image::from_path(file.path()).context("Failed to load image for tesseract")?;
        rusty_tesseract::image_to_string(&input, &self.args(language))
            .with_context(|| format!("tesseract failed for language {}", language))
    }
}

fn missing_from(language: &str, available: &[String]) -> Vec<String> {
    language
        .split('+')
        .map(str::trim)
        .filter(|lang| !lang.is_empty() && !available.iter().any(|a| a == lang))
        .map(str::to_string)
        .collect()
}
