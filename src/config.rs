use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceConfig {
    Http { base_url: String },
    File { path: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub customer_id: String,
    pub source: SourceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `get` so tests don't touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };
        let customer_id = get("FIT_TRACK_CUSTOMER_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| "1".into());
        let source = match get("FIT_TRACK_API_URL").filter(|url| !url.trim().is_empty()) {
            Some(base_url) => SourceConfig::Http { base_url },
            None => SourceConfig::File {
                path: get("APP_DATA_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data/customers.json")),
            },
        };

        Ok(Self {
            port,
            customer_id,
            source,
        })
    }
}
