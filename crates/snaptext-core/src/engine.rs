use std::sync::Arc;

use snaptext_config::Config;
use snaptext_types::Region;
use tokio_util::sync::CancellationToken;

use crate::collab::{Collaborators, Recognizer, Snapshot};
use crate::error::EngineError;
use crate::history::RegionHistory;
use crate::selector::RegionSelector;
use crate::text::clean_text;

/// Snapshot + OCR for a region, plus the history of selected regions
pub struct CaptureEngine {
    snapshot: Arc<dyn Snapshot>,
    recognizer: Arc<dyn Recognizer>,
    selector: RegionSelector,
    history: RegionHistory,
    language: String,
    vertical: bool,
    cancel: CancellationToken,
}

impl CaptureEngine {
    pub fn new(config: &Config, collaborators: Collaborators, cancel: CancellationToken) -> Self {
        let Collaborators {
            snapshot,
            recognizer,
            overlay,
            pointer,
            pointer_events,
        } = collaborators;

        let selector = RegionSelector::new(
            overlay,
            pointer,
            pointer_events,
            config.capture.selection_tick(),
        )
        .with_timeout(config.capture.selection_timeout());

        let mut history = RegionHistory::new(config.capture.history_capacity);
        if let Some(region) = config.capture.initial_region {
            tracing::info!("Preloading region {}", region);
            history.append(region);
        }

        Self {
            snapshot,
            recognizer,
            selector,
            history,
            language: config.ocr.language.clone(),
            vertical: config.ocr.is_vertical(),
            cancel,
        }
    }

    pub fn history(&self) -> &RegionHistory {
        &self.history
    }

    /// Capture `region` and return its cleaned-up text
    pub async fn capture_once(&self, region: Region) -> Result<String, EngineError> {
        let snapshot = Arc::clone(&self.snapshot);
        let recognizer = Arc::clone(&self.recognizer);
        let language = self.language.clone();

        let raw = tokio::task::spawn_blocking(move || {
            let image = snapshot.capture(region).map_err(EngineError::Snapshot)?;
            tracing::debug!(">>> [OCR] Captured {}x{}", image.width, image.height);

            recognizer
                .recognize(&image, &language)
                .map_err(EngineError::Recognition)
        })
        .await??;

        let text = clean_text(&raw, self.vertical);
        tracing::debug!(">>> [OCR] Got text: {} chars", text.chars().count());
        Ok(text)
    }

    /// Let the user select a region, remember it and capture it
    pub async fn capture_interactive(&mut self) -> Result<String, EngineError> {
        let region = self.selector.select_region(&self.cancel).await?;
        self.history.append(region);
        self.capture_once(region).await
    }

    /// Capture the most recently selected region again.
    ///
    /// `None` when nothing was selected yet.
    pub async fn capture_last_region(&self) -> Result<Option<String>, EngineError> {
        let Some(region) = self.history.most_recent() else {
            tracing::debug!("No region selected yet");
            return Ok(None);
        };

        self.capture_once(region).await.map(Some)
    }
}
