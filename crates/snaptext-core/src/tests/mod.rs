//! Fake collaborators shared by the engine tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use snaptext_config::Config;
use snaptext_translator::{ProviderMetadata, TranslateError, Translation, Translator};
use snaptext_types::{AppEvent, Point, PointerEvent, RawImage, Region, TextSource};
use tokio_util::sync::CancellationToken;

use crate::collab::{Collaborators, Overlay, Pointer, Recognizer, Snapshot};
use crate::engine::CaptureEngine;
use crate::sink::TextSink;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCall {
    Draw(Point, Point),
    Clear,
    Refresh,
}

#[derive(Default)]
pub struct FakeOverlay {
    pub calls: Mutex<Vec<OverlayCall>>,
}

impl FakeOverlay {
    pub fn calls(&self) -> Vec<OverlayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than refresh, in order
    pub fn drawing(&self) -> Vec<OverlayCall> {
        self.calls()
            .into_iter()
            .filter(|c| *c != OverlayCall::Refresh)
            .collect()
    }
}

impl Overlay for FakeOverlay {
    fn draw_rect(&self, from: Point, to: Point) {
        self.calls.lock().unwrap().push(OverlayCall::Draw(from, to));
    }

    fn clear_rect(&self) {
        self.calls.lock().unwrap().push(OverlayCall::Clear);
    }

    fn refresh(&self) {
        self.calls.lock().unwrap().push(OverlayCall::Refresh);
    }
}

/// Reports a fixed position and, when asked for it, plays the scripted
/// gesture into the event channel.
pub struct ScriptedPointer {
    pub position: Point,
    pub script: Mutex<VecDeque<Vec<PointerEvent>>>,
    pub tx: Option<AsyncSender<PointerEvent>>,
}

impl ScriptedPointer {
    pub fn push_gesture(&self, events: Vec<PointerEvent>) {
        self.script.lock().unwrap().push_back(events);
    }
}

impl Pointer for ScriptedPointer {
    fn position(&self) -> Point {
        let gesture = self.script.lock().unwrap().pop_front();
        if let (Some(tx), Some(events)) = (&self.tx, gesture) {
            for event in events {
                tx.try_send(event).unwrap();
            }
        }
        self.position
    }
}

#[derive(Default)]
pub struct FakeSnapshot {
    pub regions: Mutex<Vec<Region>>,
    pub fail: Mutex<bool>,
}

impl FakeSnapshot {
    pub fn regions(&self) -> Vec<Region> {
        self.regions.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.regions.lock().unwrap().len()
    }
}

impl Snapshot for FakeSnapshot {
    fn capture(&self, region: Region) -> anyhow::Result<RawImage> {
        self.regions.lock().unwrap().push(region);
        if *self.fail.lock().unwrap() {
            bail!("screen unavailable");
        }

        Ok(RawImage {
            data: vec![0; (region.width() * region.height() * 4) as usize],
            width: region.width(),
            height: region.height(),
        })
    }
}

/// Returns scripted outputs in order, then repeats the last one
pub struct ScriptedRecognizer {
    pub outputs: Mutex<VecDeque<String>>,
    pub last: Mutex<String>,
    pub languages: Mutex<Vec<String>>,
}

impl ScriptedRecognizer {
    pub fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: Mutex::new(outputs.iter().map(|s| s.to_string()).collect()),
            last: Mutex::new(String::new()),
            languages: Mutex::new(Vec::new()),
        }
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&self, _image: &RawImage, language: &str) -> anyhow::Result<String> {
        self.languages.lock().unwrap().push(language.to_string());

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.outputs.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub published: Mutex<Vec<(String, TextSource)>>,
}

impl RecordingSink {
    pub fn published(&self) -> Vec<(String, TextSource)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextSink for RecordingSink {
    async fn publish(&self, text: String, source: TextSource) {
        self.published.lock().unwrap().push((text, source));
    }

    async fn contents(&self) -> String {
        self.published
            .lock()
            .unwrap()
            .last()
            .map(|(text, _)| text.clone())
            .unwrap_or_default()
    }
}

pub enum Reply {
    Text(String),
    Fail,
    /// Never answers
    Stall,
}

pub struct FakeTranslator {
    pub reply: Reply,
    pub requests: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with_reply(Reply::Fail)
    }

    pub fn stalled() -> Self {
        Self::with_reply(Reply::Stall)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: String,
        to: String,
    ) -> Result<Translation, TranslateError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), from.clone(), to.clone()));

        match &self.reply {
            Reply::Text(reply) => Ok(Translation {
                text: reply.clone(),
                from,
                to,
                provider: "fake".to_string(),
            }),
            Reply::Fail => Err(TranslateError::RateLimitExceeded),
            Reply::Stall => std::future::pending().await,
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".to_string(),
            requires_api_key: false,
        }
    }
}

/// Engine wired to fakes
pub struct Harness {
    pub overlay: Arc<FakeOverlay>,
    pub pointer: Arc<ScriptedPointer>,
    pub snapshot: Arc<FakeSnapshot>,
    pub recognizer: Arc<ScriptedRecognizer>,
    pub pointer_tx: AsyncSender<PointerEvent>,
    pub cancel: CancellationToken,
    pub engine: CaptureEngine,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.ocr.language = "eng".to_string();
    config.capture.selection_tick_ms = 5;
    config.capture.poll_interval_ms = 20;
    config
}

pub fn harness(config: &Config, start: Point, outputs: &[&str]) -> Harness {
    let (pointer_tx, pointer_rx): (AsyncSender<PointerEvent>, AsyncReceiver<PointerEvent>) =
        kanal::unbounded_async();

    let overlay = Arc::new(FakeOverlay::default());
    let pointer = Arc::new(ScriptedPointer {
        position: start,
        script: Mutex::new(VecDeque::new()),
        tx: Some(pointer_tx.clone()),
    });
    let snapshot = Arc::new(FakeSnapshot::default());
    let recognizer = Arc::new(ScriptedRecognizer::new(outputs));
    let cancel = CancellationToken::new();

    let engine = CaptureEngine::new(
        config,
        Collaborators {
            snapshot: snapshot.clone(),
            recognizer: recognizer.clone(),
            overlay: overlay.clone(),
            pointer: pointer.clone(),
            pointer_events: pointer_rx,
        },
        cancel.child_token(),
    );

    Harness {
        overlay,
        pointer,
        snapshot,
        recognizer,
        pointer_tx,
        cancel,
        engine,
    }
}

pub fn drag(to: Point) -> Vec<PointerEvent> {
    vec![
        PointerEvent::Moved(Point::new(to.x / 2, to.y / 2)),
        PointerEvent::Moved(to),
        PointerEvent::PrimaryDown(to),
    ]
}

pub fn statuses(rx: &AsyncReceiver<AppEvent>) -> Vec<String> {
    let mut statuses = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        if let AppEvent::StatusUpdate { status, .. } = event {
            statuses.push(status);
        }
    }
    statuses
}

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);
