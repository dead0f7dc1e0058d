use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// User configuration. Holds defaults for newly constructed rules and
/// preview preferences; evaluation semantics never read it, so a saved
/// config cannot change what an existing rule list produces.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Separator inserted between a name and a sequence/date/time block
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Zero-padding width for new sequence rules
    #[serde(default = "default_num_padding")]
    pub num_padding: u32,

    /// Whether new date rules use 4-digit years
    #[serde(default = "default_true")]
    pub year_4: bool,

    /// Whether new time rules use the 24-hour clock
    #[serde(default = "default_true")]
    pub hour_24: bool,

    /// Default preview format: "table", "json", "summary", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            num_padding: default_num_padding(),
            year_4: true,
            hour_24: true,
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_num_padding() -> u32 {
    4
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from .renamepipe/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".renamepipe").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to .renamepipe/config.toml
    pub fn save(&self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config_dir = cwd.join(".renamepipe");
        let config_path = config_dir.join("config.toml");

        // Create .renamepipe directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        self.save_to_path(&config_path)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
