use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "jpn+jpn_vert".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    #[default]
    Tesseract,
    /// Windows.Media.Ocr, only available on Windows
    Windows,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default)]
    pub backend: OcrBackend,
    /// Language passed to the OCR engine, e.g. `eng`, `kor+eng`, `jpn+jpn_vert`
    #[serde(default = "default_language")]
    pub language: String,
    /// Force vertical-script post-processing on or off.
    /// When unset it follows the language tag.
    pub vertical: Option<bool>,
    /// Tesseract page segmentation mode, engine default when unset
    pub psm: Option<i32>,
    /// Keep a PNG copy of the last snapshot here
    pub snapshot_path: Option<String>,
}

impl OcrConfig {
    pub fn is_vertical(&self) -> bool {
        self.vertical.unwrap_or_else(|| {
            self.language
                .split('+')
                .any(|lang| lang.trim().ends_with("_vert"))
        })
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            language: default_language(),
            vertical: None,
            psm: None,
            snapshot_path: None,
        }
    }
}
