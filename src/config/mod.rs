use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = ".dadjokes";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory not found: could not determine home directory")]
    HomeDirNotFound,
    #[error("failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL of the joke endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Favorites file name, relative to the config directory.
    #[serde(default = "default_favorites_file")]
    pub favorites_file: String,

    /// User-Agent sent with each request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    "https://icanhazdadjoke.com/".to_string()
}

fn default_favorites_file() -> String {
    "favorites.json".to_string()
}

fn default_user_agent() -> String {
    format!("dadjokes/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            favorites_file: default_favorites_file(),
            user_agent: default_user_agent(),
        }
    }
}

/// Return the config directory path: `~/.dadjokes/`
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home.join(CONFIG_DIR_NAME))
}

impl Config {
    /// Load configuration from the given config directory.
    /// Returns defaults if the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Where favorites live for the given config directory.
    pub fn favorites_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.favorites_file)
    }
}
