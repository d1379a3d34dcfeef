use std::time::Duration;

use kanal::AsyncSender;
use snaptext_config::hotkey::HotkeyConfig;
use snaptext_types::Action;
use tokio_util::sync::CancellationToken;

const HOTKEY_POLL: Duration = Duration::from_millis(50);

/// Forward global hotkey presses into the action queue until cancelled
pub async fn hotkey_watcher(
    config: HotkeyConfig,
    actions: AsyncSender<Action>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let handle = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let hotkeys = snaptext_ocr::HotkeyManager::new(&config)?;
        let actions = actions.to_sync();

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if let Some(action) = hotkeys.poll() {
                tracing::info!("Hotkey pressed: {:?}", action);
                if actions.send(action).is_err() {
                    tracing::warn!("Action queue closed");
                    break;
                }
            }

            std::thread::sleep(HOTKEY_POLL);
        }

        tracing::info!("Hotkey listener stopping");
        Ok(())
    });

    handle.await?
}
