use anyhow::{Context, Result, bail};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use snaptext_config::hotkey::HotkeyConfig;
use snaptext_types::Action;

/// Global hotkeys mapped to engine actions
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    bindings: Vec<(HotKey, Action)>,
}

impl HotkeyManager {
    pub fn new(config: &HotkeyConfig) -> Result<Self> {
        let bindings = parse_bindings(config)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        for (hotkey, action) in &bindings {
            manager
                .register(*hotkey)
                .with_context(|| format!("Failed to register hotkey {:?} for {:?}", hotkey, action))?;
            tracing::info!("Hotkey {:?} -> {:?}", hotkey, action);
        }

        Ok(Self { manager, bindings })
    }

    /// Action for a pending hotkey press, if any (non-blocking)
    pub fn poll(&self) -> Option<Action> {
        let receiver = GlobalHotKeyEvent::receiver();
        let event = receiver.try_recv().ok()?;

        if event.state != HotKeyState::Pressed {
            return None;
        }

        let action = action_for(&self.bindings, event.id);
        if action.is_none() {
            tracing::debug!("Hotkey event with unknown id {}", event.id);
        }
        action
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for (hotkey, _) in &self.bindings {
            let _ = self.manager.unregister(*hotkey);
        }
    }
}

/// Parse configured hotkeys; the same key may not trigger two actions
pub fn parse_bindings(config: &HotkeyConfig) -> Result<Vec<(HotKey, Action)>> {
    let mut entries = vec![
        (config.capture.as_str(), Action::CaptureInteractive),
        (config.toggle_poll.as_str(), Action::TogglePoll),
        (config.translate.as_str(), Action::Translate),
    ];
    if let Some(capture_last) = &config.capture_last {
        entries.push((capture_last.as_str(), Action::CaptureLast));
    }

    let mut bindings: Vec<(HotKey, Action)> = Vec::with_capacity(entries.len());
    for (text, action) in entries {
        let hotkey: HotKey = text
            .parse()
            .with_context(|| format!("Invalid hotkey {:?} for {:?}", text, action))?;

        if let Some((_, other)) = bindings.iter().find(|(h, _)| h.id() == hotkey.id()) {
            bail!("Hotkey {:?} is bound to both {:?} and {:?}", text, other, action);
        }
        bindings.push((hotkey, action));
    }

    Ok(bindings)
}

fn action_for(bindings: &[(HotKey, Action)], id: u32) -> Option<Action> {
    bindings
        .iter()
        .find(|(hotkey, _)| hotkey.id() == id)
        .map(|(_, action)| *action)
}
