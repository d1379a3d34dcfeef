use std::time::Duration;

use snaptext_translator::TranslateError;
use snaptext_types::RegionError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Snapshot failed: {0:#}")]
    Snapshot(anyhow::Error),

    #[error("Recognition failed: {0:#}")]
    Recognition(anyhow::Error),

    #[error("Invalid selection: {0}")]
    Region(#[from] RegionError),

    #[error("Selection aborted")]
    SelectionAborted,

    #[error("Selection timed out after {0:?}")]
    SelectionTimedOut(Duration),

    #[error("Pointer event stream closed")]
    PointerClosed,

    #[error("Translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("Capture worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
