use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::hotkey::HotkeyConfig;
use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;

pub mod capture;
pub mod hotkey;
pub mod ocr;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub capture: CaptureConfig,
    pub translator: TranslatorConfig,
    pub hotkeys: HotkeyConfig,
}

impl Config {
    /// Overlay environment variables on top of file or default values.
    ///
    /// API credentials only ever come from here.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(lang) = var("SNAPTEXT_OCR_LANG").filter(|v| !v.is_empty()) {
            self.ocr.language = lang;
        }

        if let Some(url) = var("TRANSLATOR_URL").filter(|v| !v.is_empty()) {
            self.translator.api_url = url;
        }

        if let Some(id) = var("TRANSLATOR_CLIENT_ID") {
            self.translator.client_id = id;
        }

        if let Some(secret) = var("TRANSLATOR_CLIENT_SECRET") {
            self.translator.client_secret = secret;
        }
    }
}
