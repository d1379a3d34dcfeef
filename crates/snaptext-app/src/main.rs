use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use snaptext_config::Config;
use snaptext_core::Collaborators;
use snaptext_ocr::{DevicePointer, XcapSnapshot};
use snaptext_translator::{PapagoTranslator, Translator};
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

mod config_file;
mod controller;
mod io;
mod overlay;
mod status;
mod ui;

#[cfg(test)]
mod tests;

use config_file::{init_config, load_config};
use controller::AppController;
use overlay::LogOverlay;

#[derive(Parser, Debug)]
#[command(name = "snaptext", about = "Capture screen regions and read them with OCR")]
struct Args {
    /// JSON config file
    #[arg(long, default_value = "snaptext.json")]
    config: PathBuf,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Write the default config to --config and exit
    #[arg(long)]
    init_config: bool,

    /// Do not register global hotkeys
    #[arg(long)]
    no_hotkeys: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env loaded: {}", e);
    }

    if args.init_config {
        if !init_config(&args.config)? {
            tracing::warn!("{} already exists", args.config.display());
        }
        return Ok(());
    }

    let config = load_config(&args.config)?;
    tracing::info!(
        "snaptext v{} starting, language {}",
        env!("CARGO_PKG_VERSION"),
        config.ocr.language
    );

    let translator = build_translator(&config);

    // Pointer callbacks stop when this is dropped
    let (pointer_tx, pointer_rx) = kanal::bounded(256);
    let _pointer_listener = snaptext_ocr::listen(pointer_tx, config.capture.selection_tick())
        .context("Failed to start pointer listener")?;

    let collaborators = Collaborators {
        snapshot: Arc::new(XcapSnapshot::new(
            config.ocr.snapshot_path.as_ref().map(PathBuf::from),
        )),
        recognizer: snaptext_ocr::recognizer_for(&config.ocr)?,
        overlay: Arc::new(LogOverlay::new()),
        pointer: Arc::new(DevicePointer),
        pointer_events: pointer_rx.to_async(),
    };

    let controller = AppController::new(config);
    let mut tasks = controller.spawn_tasks(collaborators, translator, std::io::stdout());
    if !args.no_hotkeys {
        controller.spawn_hotkeys(&mut tasks);
    }

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            report_task(result);
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        report_task(result);
    }

    let summary = controller.status().snapshot().await;
    tracing::info!(
        captures = summary.capture_count,
        polls = summary.poll_count,
        translations = summary.translation_count,
        errors = summary.error_count,
        "Session finished: {}",
        summary.current_message
    );

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

fn build_translator(config: &Config) -> Option<Arc<dyn Translator>> {
    let settings = &config.translator;
    if !settings.enabled {
        tracing::info!("Translation disabled in config");
        return None;
    }

    let translator = match PapagoTranslator::new(settings) {
        Ok(translator) => translator,
        Err(e) => {
            tracing::error!("Failed to build translator, translation disabled: {}", e);
            return None;
        }
    };

    let metadata = translator.metadata();
    if metadata.requires_api_key && !settings.has_credentials() {
        tracing::warn!("{} credentials missing, translation disabled", metadata.name);
        return None;
    }

    tracing::info!("Translation via {}", metadata.name);
    Some(Arc::new(translator))
}

fn report_task(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("Task finished"),
        Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
        Err(e) => tracing::error!("Task panicked: {}", e),
    }
}
