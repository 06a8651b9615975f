use std::{env, time::Duration};
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_API_VERSION: &str = "2022-06-28";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote habit store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_token: Option<String>,
    pub collection_id: Option<String>,
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            collection_id: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    pub fn new(api_token: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            collection_id: Some(collection_id.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some() && self.collection_id.is_some()
    }

    /// Reads `HABITS_*` variables, keeping defaults for anything unset or blank.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_token: non_empty_var("HABITS_API_TOKEN"),
            collection_id: non_empty_var("HABITS_COLLECTION_ID"),
            ..Self::default()
        };

        if let Some(base_url) = non_empty_var("HABITS_API_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(version) = non_empty_var("HABITS_API_VERSION") {
            config.api_version = version;
        }
        if let Some(raw) = non_empty_var("HABITS_API_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("ignoring invalid HABITS_API_TIMEOUT_SECS value: {raw}"),
            }
        }

        config
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
