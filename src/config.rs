//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/contactbook/contactbook.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `CONTACTBOOK_*` prefix (`__` for nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How records are rendered in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Separator between fields on a record line
    pub separator: String,
    /// Shown in place of an absent optional field
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            separator: " - ".into(),
            placeholder: "None".into(),
        }
    }
}

/// Raw display config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub separator: Option<String>,
    pub placeholder: Option<String>,
}

impl DisplayConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            placeholder: overlay
                .placeholder
                .clone()
                .unwrap_or_else(|| self.placeholder.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub banner: Option<String>,
    pub prompt: Option<String>,
    pub confirm_exit: Option<bool>,
    #[serde(default)]
    pub display: RawDisplayConfig,
}

/// Unified configuration for contactbook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Greeting printed above the menu
    pub banner: String,
    /// Prompt for the menu choice
    pub prompt: String,
    /// Ask "Wanna leave(y/n)" before exiting
    pub confirm_exit: bool,
    /// Record rendering
    pub display: DisplayConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            banner: "Hello Welcome to Contact Book.".into(),
            prompt: "> ".into(),
            confirm_exit: true,
            display: DisplayConfig::default(),
        }
    }
}

/// Get the XDG config directory for contactbook.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "contactbook").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("contactbook.toml"))
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
    /// Overlay wins for every value it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            banner: overlay.banner.clone().unwrap_or_else(|| self.banner.clone()),
            prompt: overlay.prompt.clone().unwrap_or_else(|| self.prompt.clone()),
            confirm_exit: overlay.confirm_exit.unwrap_or(self.confirm_exit),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), config_file)
    }

    /// Load settings from explicit layer locations.
    ///
    /// A missing `global` file is skipped; a missing `local` file is an error
    /// because the user asked for it.
    pub fn load_layers(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply CONTACTBOOK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("CONTACTBOOK")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("banner") {
            settings.banner = val;
        }
        if let Ok(val) = config.get_string("prompt") {
            settings.prompt = val;
        }
        if let Ok(val) = config.get_bool("confirm_exit") {
            settings.confirm_exit = val;
        }
        if let Ok(val) = config.get_string("display.separator") {
            settings.display.separator = val;
        }
        if let Ok(val) = config.get_string("display.placeholder") {
            settings.display.placeholder = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# contactbook configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/contactbook/contactbook.toml
#   Explicit: contactbook --config <FILE>
#   Env:      CONTACTBOOK_* environment variables
#             (nested keys use "__", e.g. CONTACTBOOK_DISPLAY__SEPARATOR)

# Greeting printed above the menu
# banner = "Hello Welcome to Contact Book."

# Prompt for the menu choice
# prompt = "> "

# Ask for confirmation before leaving
# confirm_exit = true

[display]
# Separator between fields when listing contacts
# separator = " - "

# Shown for a missing email or address
# placeholder = "None"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
