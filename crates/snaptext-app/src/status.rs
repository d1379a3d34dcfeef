use std::time::SystemTime;

use snaptext_types::{AppEvent, TextSource};
use tokio::sync::RwLock;

/// What the console view has seen so far
#[derive(Clone, Debug, Default)]
pub struct CaptureStatus {
    pub backend_ready: bool,
    pub polling: bool,
    pub last_text_time: Option<SystemTime>,
    pub capture_count: u64,
    pub poll_count: u64,
    pub translation_count: u64,
    pub error_count: u64,
    pub current_message: String,
}

/// Application status
pub struct AppStatus {
    pub capture: RwLock<CaptureStatus>,
}

impl AppStatus {
    pub fn new() -> Self {
        Self {
            capture: RwLock::new(CaptureStatus::default()),
        }
    }

    pub async fn record(&self, event: &AppEvent) {
        let mut status = self.capture.write().await;

        match event {
            AppEvent::BackendReady => status.backend_ready = true,
            AppEvent::ShowText { source, .. } => {
                status.last_text_time = Some(SystemTime::now());
                match source {
                    TextSource::Capture => status.capture_count += 1,
                    TextSource::Poll => status.poll_count += 1,
                    TextSource::Translation => status.translation_count += 1,
                }
            }
            AppEvent::StatusUpdate {
                status: message,
                polling,
            } => {
                status.polling = *polling;
                if is_failure(message) {
                    status.error_count += 1;
                }
                status.current_message = message.clone();
            }
        }
    }

    pub async fn snapshot(&self) -> CaptureStatus {
        self.capture.read().await.clone()
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}

fn is_failure(message: &str) -> bool {
    message.starts_with("Failed") || message.starts_with("Polling stopped:")
}
