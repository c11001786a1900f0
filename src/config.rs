use crate::constants;
use crate::domain::Tier;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,

    pub cards: CardsConfig,

    pub codes: CodesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: String,

    pub name: String,

    pub characters_collection: String,

    pub cards_collection: String,

    /// Create a unique index on `cards.uuid` when connecting.
    pub ensure_unique_index: bool,

    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: constants::database::URI.to_string(),
            name: constants::database::NAME.to_string(),
            characters_collection: constants::database::CHARACTERS.to_string(),
            cards_collection: constants::database::CARDS.to_string(),
            ensure_unique_index: true,
            server_selection_timeout_secs: constants::database::SERVER_SELECTION_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    pub set_id: String,

    /// One card is generated per image, in this order.
    pub images: Vec<String>,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            set_id: constants::DEFAULT_SET_ID.to_string(),
            images: constants::IMAGE_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodesConfig {
    /// Random characters after the prefix on the first round.
    pub initial_length: usize,

    /// Attempts on the first round; doubled every time a length is exhausted.
    pub initial_attempts: usize,
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            initial_length: constants::codes::INITIAL_LENGTH,
            initial_attempts: constants::codes::INITIAL_ATTEMPTS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hakari-cards").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".hakari-cards").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the defaults to `path` unless a file is already there.
    ///
    /// Returns whether a file was created.
    pub fn create_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let db = &self.database;
        if db.uri.is_empty() {
            anyhow::bail!("Database URI cannot be empty");
        }
        if db.name.is_empty() {
            anyhow::bail!("Database name cannot be empty");
        }
        if db.characters_collection.is_empty() || db.cards_collection.is_empty() {
            anyhow::bail!("Collection names cannot be empty");
        }

        if self.cards.images.is_empty() {
            anyhow::bail!("At least one card image must be configured");
        }

        let mut seen = HashSet::new();
        for image in &self.cards.images {
            if Tier::classify(image).is_none() {
                anyhow::bail!("Card image '{image}' does not match any tier keyword");
            }
            if !seen.insert(image.as_str()) {
                anyhow::bail!("Card image '{image}' is listed more than once");
            }
        }

        if self.codes.initial_length == 0 {
            anyhow::bail!("Initial code length must be > 0");
        }
        if self.codes.initial_attempts == 0 {
            anyhow::bail!("Initial code attempts must be > 0");
        }

        Ok(())
    }
}
