use std::path::PathBuf;

use serde::Deserialize;

use crate::dataset::default_dataset_path;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the movies CSV loaded at startup and on reload
    #[serde(default = "default_dataset_path")]
    pub movies_csv: PathBuf,

    /// Suggestions returned alongside an empty recommendation list
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Upper bound for the `limit` query parameter
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_max_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            movies_csv: default_dataset_path(),
            suggestion_limit: default_suggestion_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
