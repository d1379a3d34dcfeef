use async_trait::async_trait;
use kanal::AsyncSender;
use snaptext_types::{AppEvent, TextSource};
use tokio::sync::RwLock;

/// Where recognized text ends up
#[async_trait]
pub trait TextSink: Send + Sync {
    /// Replace the displayed text
    async fn publish(&self, text: String, source: TextSource);

    /// Full text currently displayed
    async fn contents(&self) -> String;
}

/// Keeps the current text and mirrors every change to the UI
pub struct TextBuffer {
    text: RwLock<String>,
    event_tx: AsyncSender<AppEvent>,
}

impl TextBuffer {
    pub fn new(event_tx: AsyncSender<AppEvent>) -> Self {
        Self {
            text: RwLock::new(String::new()),
            event_tx,
        }
    }
}

#[async_trait]
impl TextSink for TextBuffer {
    async fn publish(&self, text: String, source: TextSource) {
        *self.text.write().await = text.clone();

        if let Err(e) = self.event_tx.send(AppEvent::ShowText { text, source }).await {
            tracing::warn!("Failed to send text to UI: {}", e);
        }
    }

    async fn contents(&self) -> String {
        self.text.read().await.clone()
    }
}
