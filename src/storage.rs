use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ConfigError;
use crate::model::PickerConfig;

const APP_DIR: &str = "repo-file-picker";
pub(crate) const TOKEN_VAR: &str = "gitHubApiKey";
pub(crate) const TOKEN_FALLBACK_VAR: &str = "GITHUB_TOKEN";

pub(crate) fn config_path() -> Result<PathBuf> {
    app_file("config.json")
}

pub(crate) fn log_path() -> Result<PathBuf> {
    app_file("picker.log")
}

fn app_file(name: &str) -> Result<PathBuf> {
    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_DIR);
        dir.push(name);
        return Ok(dir);
    }
    let mut fallback = std::env::current_dir().context("current dir")?;
    fallback.push(format!("{APP_DIR}-{name}"));
    Ok(fallback)
}

pub(crate) fn load_or_init_config(path: &Path) -> Result<PickerConfig, ConfigError> {
    if path.exists() {
        return load_config(path);
    }
    let config = PickerConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

pub(crate) fn load_config(path: &Path) -> Result<PickerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub(crate) fn save_config(path: &Path, config: &PickerConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Reads the API token through `lookup`, normally `std::env::var`.
pub(crate) fn load_token<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [TOKEN_VAR, TOKEN_FALLBACK_VAR]
        .into_iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or(ConfigError::MissingToken(TOKEN_VAR))
}
