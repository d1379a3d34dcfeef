use std::io::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use snaptext_types::{AppEvent, TextSource};
use tokio_util::sync::CancellationToken;

use crate::status::AppStatus;

/// Console text view: prints every published text to `out`
pub async fn ui_loop<W: Write + Send>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    status: Arc<AppStatus>,
    mut out: W,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        status.record(&event).await;

        match event {
            AppEvent::BackendReady => tracing::info!("Ready"),
            AppEvent::StatusUpdate { status, polling } => {
                tracing::info!(polling, "{}", status);
            }
            AppEvent::ShowText { text, source } => {
                writeln!(out, "{}", render(&text, source))?;
                out.flush()?;
            }
        }
    }

    tracing::debug!("UI loop stopping");
    Ok(())
}

fn render(text: &str, source: TextSource) -> String {
    let label = match source {
        TextSource::Capture => "capture",
        TextSource::Poll => "poll",
        TextSource::Translation => "translation",
    };
    format!("[{}]\n{}", label, text)
}
