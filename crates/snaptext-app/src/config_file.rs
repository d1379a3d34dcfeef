use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use snaptext_config::Config;

/// Load config from a JSON file, then apply environment overrides.
///
/// A missing file means defaults.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let mut config = if path.exists() {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Invalid config file {}", path.display()))?
    } else {
        tracing::warn!("Config {} not found, using defaults", path.display());
        Config::default()
    };

    config.apply_env();
    Ok(config)
}

/// Write the default config unless the file already exists
pub fn init_config(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&Config::default())?)?;
    tracing::info!("Created default config at {}", path.display());
    Ok(true)
}
