use serde::{Deserialize, Serialize};

fn default_capture() -> String {
    "control+KeyQ".to_string()
}

fn default_toggle_poll() -> String {
    "control+KeyR".to_string()
}

fn default_translate() -> String {
    "control+KeyT".to_string()
}

/// Global hotkeys, in `global-hotkey` notation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    #[serde(default = "default_capture")]
    pub capture: String,
    #[serde(default = "default_toggle_poll")]
    pub toggle_poll: String,
    #[serde(default = "default_translate")]
    pub translate: String,
    pub capture_last: Option<String>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            capture: default_capture(),
            toggle_poll: default_toggle_poll(),
            translate: default_translate(),
            capture_last: None,
        }
    }
}
