//! Application configuration for guidegen.
//!
//! User config lives at `~/.guidegen/guidegen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuidegenError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "guidegen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".guidegen";

// ---------------------------------------------------------------------------
// Config structs (matching guidegen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Corpus root directory all loader keys are relative to.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Directory for generated reports and index files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Optional directory of `.md` templates overriding the built-in ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,

    /// Content locale prefix.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            template_dir: None,
            locale: default_locale(),
        }
    }
}

fn default_content_dir() -> String {
    "content".into()
}
fn default_output_dir() -> String {
    "out".into()
}
fn default_locale() -> String {
    "en".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.guidegen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GuidegenError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.guidegen/guidegen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GuidegenError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        GuidegenError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GuidegenError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GuidegenError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GuidegenError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
