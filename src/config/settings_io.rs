use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::settings::GameSettings;

const APP_DIR: &str = "taleweaver";
const SETTINGS_FILE: &str = "settings.json";

/// Default location: `<config dir>/taleweaver/settings.json`.
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(SETTINGS_FILE);
    path
}

/// A missing file yields defaults; a file that exists but does not parse is
/// an error.
pub fn load_settings(path: &Path) -> Result<GameSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(GameSettings::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("parsing settings in {}", path.display()))?;

    info!(path = %path.display(), "settings loaded");
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &GameSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;

    info!(path = %path.display(), "settings saved");
    Ok(())
}
