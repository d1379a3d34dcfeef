use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use snaptext_config::Config;
use snaptext_translator::Translator;
use snaptext_types::{Action, AppEvent, TextSource};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::engine::CaptureEngine;
use crate::error::EngineError;
use crate::poll::{PollLoop, PollState};
use crate::sink::TextSink;
use crate::translate::translate_sink;

/// Single owner of the engine.
///
/// Actions and poll ticks run one at a time from one loop, so two
/// captures never overlap. Pending actions go before a due tick.
pub struct Dispatcher {
    engine: CaptureEngine,
    poll: PollLoop,
    sink: Arc<dyn TextSink>,
    translator: Option<Arc<dyn Translator>>,
    source_lang: String,
    target_lang: String,
    event_tx: AsyncSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        config: &Config,
        engine: CaptureEngine,
        sink: Arc<dyn TextSink>,
        translator: Option<Arc<dyn Translator>>,
        event_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            engine,
            poll: PollLoop::new(config.capture.poll_interval()),
            sink,
            translator,
            source_lang: config.translator.source_lang.clone(),
            target_lang: config.translator.target_lang.clone(),
            event_tx,
        }
    }

    pub fn engine(&self) -> &CaptureEngine {
        &self.engine
    }

    pub fn poll_state(&self) -> PollState {
        self.poll.state()
    }

    /// Run until cancelled or every action sender is gone
    pub async fn run(
        &mut self,
        actions: AsyncReceiver<Action>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        tracing::info!("[DISPATCH] Waiting for actions");
        let _ = self.event_tx.send(AppEvent::BackendReady).await;

        let mut next_tick = Instant::now();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("[DISPATCH] Shutdown requested");
                    break;
                }
                action = actions.recv() => {
                    let Ok(action) = action else {
                        tracing::info!("[DISPATCH] Action channel closed");
                        break;
                    };

                    let was_running = self.poll.is_running();
                    self.handle(action, &cancel).await;
                    if !was_running && self.poll.is_running() {
                        next_tick = Instant::now();
                    }
                }
                _ = tokio::time::sleep_until(next_tick), if self.poll.is_running() => {
                    self.poll_tick().await;
                    next_tick = Instant::now() + self.poll.interval();
                }
            }
        }

        Ok(())
    }

    /// Run one action. Shutdown abandons a pending translation.
    pub async fn handle(&mut self, action: Action, cancel: &CancellationToken) {
        tracing::debug!(">>> [DISPATCH] {:?}", action);

        match action {
            Action::CaptureInteractive => {
                self.status("Selecting region").await;
                match self.engine.capture_interactive().await {
                    Ok(text) => self.show(text, TextSource::Capture).await,
                    Err(EngineError::SelectionAborted) => self.status("Selection cancelled").await,
                    Err(e) => self.report(action, e).await,
                }
            }
            Action::CaptureLast => match self.engine.capture_last_region().await {
                Ok(Some(text)) => self.show(text, TextSource::Capture).await,
                Ok(None) => self.status("No region selected yet").await,
                Err(e) => self.report(action, e).await,
            },
            Action::TogglePoll => {
                let ready = !self.engine.history().is_empty();
                match self.poll.toggle(ready) {
                    PollState::Running => self.status("Polling").await,
                    PollState::Idle if ready => self.status("Polling stopped").await,
                    PollState::Idle => self.status("No region selected yet").await,
                }
            }
            Action::Translate => {
                let Some(translator) = self.translator.clone() else {
                    tracing::warn!("Translation disabled");
                    self.status("Translation disabled").await;
                    return;
                };

                let translated = tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("[DISPATCH] Translation abandoned on shutdown");
                        return;
                    }
                    result = translate_sink(
                        translator.as_ref(),
                        self.sink.as_ref(),
                        &self.source_lang,
                        &self.target_lang,
                    ) => result,
                };

                match translated {
                    Ok(_) => self.status("Translated").await,
                    Err(e) => self.report(action, e).await,
                }
            }
        }
    }

    async fn poll_tick(&mut self) {
        if let Err(e) = self.poll.tick(&self.engine, self.sink.as_ref()).await {
            self.poll.stop();
            tracing::error!("[POLL] Tick failed, stopping: {}", e);
            self.status(&format!("Polling stopped: {}", e)).await;
        }
    }

    async fn show(&self, text: String, source: TextSource) {
        if text.is_empty() {
            self.status("No text found").await;
        } else {
            self.status("Ready").await;
        }
        self.sink.publish(text, source).await;
    }

    async fn report(&self, action: Action, error: EngineError) {
        tracing::error!(">>> [DISPATCH] {:?} failed: {}", action, error);
        self.status(&format!("Failed: {}", error)).await;
    }

    async fn status(&self, status: &str) {
        let _ = self
            .event_tx
            .send(AppEvent::StatusUpdate {
                status: status.to_string(),
                polling: self.poll.is_running(),
            })
            .await;
    }
}
