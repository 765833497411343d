use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{NoiseSettings, SettingsError};

/// Load settings from a file, choosing the format by extension.
///
/// `.json` files are parsed as JSON; anything else is treated as TOML.
pub fn settings_from_file(path: &Path) -> Result<NoiseSettings, SettingsError> {
    let data = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), is_json, "loading noise settings");
    if is_json {
        settings_from_json_str(&data)
    } else {
        settings_from_str(&data)
    }
}

/// Parse TOML settings. Missing keys take their default values.
pub fn settings_from_str(input: &str) -> Result<NoiseSettings, SettingsError> {
    Ok(toml::from_str(input)?)
}

/// Parse JSON settings. Missing keys take their default values.
pub fn settings_from_json_str(input: &str) -> Result<NoiseSettings, SettingsError> {
    Ok(serde_json::from_str(input)?)
}
