use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://openapi.naver.com/v1/papago/n2mt".to_string()
}

fn default_source_lang() -> String {
    "ja".to_string()
}

fn default_target_lang() -> String {
    "ko".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_id_header() -> String {
    "X-Client-Id".to_string()
}

fn default_secret_header() -> String {
    "X-Client-Secret".to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Give up on a translation request after this long
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Header carrying the client id
    #[serde(default = "default_id_header")]
    pub id_header: String,
    /// Header carrying the client secret
    #[serde(default = "default_secret_header")]
    pub secret_header: String,
    #[serde(skip)]
    pub client_id: String,
    #[serde(skip)]
    pub client_secret: String,
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl std::fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("enabled", &self.enabled)
            .field("api_url", &self.api_url)
            .field("source_lang", &self.source_lang)
            .field("target_lang", &self.target_lang)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_ms: default_timeout_ms(),
            id_header: default_id_header(),
            secret_header: default_secret_header(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}
