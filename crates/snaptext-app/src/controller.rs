use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use snaptext_config::Config;
use snaptext_core::{CaptureEngine, Collaborators, Dispatcher, TextBuffer};
use snaptext_translator::Translator;
use snaptext_types::{Action, AppEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::io::hotkey_watcher;
use crate::status::AppStatus;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub actions: (AsyncSender<Action>, AsyncReceiver<Action>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // poll bursts
            actions: kanal::bounded_async(64),    // hotkey presses
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    config: Config,
    status: Arc<AppStatus>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(config: Config) -> Self {
        Self {
            channels: ChannelSet::new(),
            config,
            status: Arc::new(AppStatus::new()),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn status(&self) -> Arc<AppStatus> {
        self.status.clone()
    }

    /// Queue for actions; hotkeys feed it, so can anything else
    pub fn action_sender(&self) -> AsyncSender<Action> {
        self.channels.actions.0.clone()
    }

    /// Spawn the dispatcher and the text view
    pub fn spawn_tasks<W>(
        &self,
        collaborators: Collaborators,
        translator: Option<Arc<dyn Translator>>,
        out: W,
    ) -> JoinSet<anyhow::Result<()>>
    where
        W: Write + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        let event_tx = self.channels.app_to_ui.0.clone();
        let sink = Arc::new(TextBuffer::new(event_tx.clone()));
        let engine = CaptureEngine::new(&self.config, collaborators, self.cancel_token.child_token());
        let mut dispatcher = Dispatcher::new(&self.config, engine, sink, translator, event_tx);

        // Dispatcher
        let actions = self.channels.actions.1.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move { dispatcher.run(actions, cancel).await });

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.status.clone(),
            out,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Listen for global hotkeys
    pub fn spawn_hotkeys(&self, tasks: &mut JoinSet<anyhow::Result<()>>) {
        tasks.spawn(hotkey_watcher(
            self.config.hotkeys.clone(),
            self.action_sender(),
            self.cancel_token.child_token(),
        ));
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
