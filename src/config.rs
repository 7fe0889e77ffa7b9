//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/linktree/linktree.toml`
//! 3. Environment variables: `LINKTREE_*` prefix
//! 4. Command line (`--store`), applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_path: Option<PathBuf>,
    pub editor: Option<String>,
}

/// Unified configuration for linktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Link store file (default: `<data_dir>/linktree/links.toml`)
    pub store_path: PathBuf,
    /// Editor command (default: $EDITOR or "vim")
    pub editor: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Try $EDITOR, fall back to vim
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".into());

        Self {
            store_path: default_store_path(),
            editor,
        }
    }
}

/// Get the default store location inside the platform data directory.
fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "linktree")
        .map(|dirs| dirs.data_dir().join("links.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.linktree/links.toml"))
}

/// Get the XDG config directory for linktree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "linktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("linktree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.store_path.to_string_lossy().as_ref());
        self.store_path = PathBuf::from(expanded);
        self.editor = expand_env_vars(&self.editor);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            store_path: overlay
                .store_path
                .clone()
                .unwrap_or_else(|| self.store_path.clone()),
            editor: overlay
                .editor
                .clone()
                .unwrap_or_else(|| self.editor.clone()),
        }
    }

    /// Load settings from defaults, the global config file and `LINKTREE_*`
    /// environment variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Same as [`Settings::load`] with an explicit config file location.
    ///
    /// A missing file is skipped.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply LINKTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("LINKTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_path") {
            settings.store_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("editor") {
            settings.editor = val;
        }

        Ok(settings)
    }

    /// Replace the store location (command line override), expanding `~` and `$VAR`.
    pub fn with_store_path(mut self, store_path: &Path) -> Self {
        self.store_path = PathBuf::from(expand_env_vars(store_path.to_string_lossy().as_ref()));
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# linktree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/linktree/linktree.toml
#   Env:    LINKTREE_* environment variables (explicit overrides)
#   CLI:    --store <path>

# Link store file
# store_path = "~/.local/share/linktree/links.toml"

# Editor for `linktree edit`
# editor = "vim"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
