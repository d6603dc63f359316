use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::draw::LayoutConfig;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rag.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagConfig {
    /// Preferred output mode (`pretty`, `text` or `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Resolve the config file to use.
///
/// Order: the explicit `--config` path, `./rag.toml`, then
/// `<config_dir>/rag/config.toml`. Returns `None` when nothing exists.
pub fn config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("rag/config.toml");
    user.exists().then_some(user)
}

/// Load configuration, falling back to defaults when no file is found.
///
/// # Errors
///
/// Returns an error if an explicit path is missing or any chosen file
/// cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<RagConfig> {
    let Some(path) = config_path(explicit, cwd) else {
        return Ok(RagConfig::default());
    };
    load_config_file(&path)
}

/// Parse a single config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config_file(path: &Path) -> Result<RagConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RagConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
