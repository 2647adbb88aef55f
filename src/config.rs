use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `postgres_url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Mirror logs to stdout. Unset means on for text output, off for JSON.
    #[serde(default)]
    pub log_stdout: Option<bool>,
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    /// PostgreSQL connection URL for the todo store
    #[serde(default)]
    pub postgres_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Send no-cache headers on every response (development only)
    #[serde(default)]
    pub no_cache: bool,
}

fn default_public_dir() -> String {
    "./public".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatConfig {
    /// Whether the sender receives its own message back
    pub echo_to_sender: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            echo_to_sender: true,
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`, then apply `DATABASE_URL` if set.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(format!("config/{}.yaml", env))?;
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                config.postgres_url = Some(url);
            }
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// `host:port` the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
