use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.yaml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// How long the event loop waits for input before redrawing.
    pub poll_interval_ms: u64,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Show the key binding table under each view.
    pub show_help: bool,
    /// Where the TUI writes its log. No log output when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            poll_interval_ms: 16,
            log_level: "warn".to_string(),
            show_help: true,
            log_file: None,
        }
    }
}

/// Wrapper for the `settings` key of config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl AppSettings {
    /// Reads `config.yaml` from `dir`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let wrapper: SettingsWrapper = serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))?;
        Ok(wrapper.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(CONFIG_FILENAME);
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        let contents = serde_norway::to_string(&wrapper).context("failed to serialize YAML")?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
