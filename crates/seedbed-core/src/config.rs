use crate::errors::ConfigError;
use std::env;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_KEY: &str = "SUPABASE_ANON_KEY";

/// Values that ship in env templates. Treated as "not configured yet".
const PLACEHOLDERS: &[&str] = &[
    "https://your-supabase-url.supabase.co",
    "your-anon-key",
    "YOUR_SUPABASE_URL",
    "YOUR_SUPABASE_KEY",
];

/// Validated connection settings for the hosted data API.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    /// Validates both values up front so a misconfigured run aborts before
    /// any remote call is made.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let key = key.into().trim().to_string();

        if url.is_empty() {
            return Err(ConfigError(format!("{ENV_URL} is empty")));
        }
        if key.is_empty() {
            return Err(ConfigError(format!("{ENV_KEY} is empty")));
        }
        if PLACEHOLDERS.contains(&url.as_str()) {
            return Err(ConfigError(format!(
                "{ENV_URL} still holds the placeholder value; set your real project URL"
            )));
        }
        if PLACEHOLDERS.contains(&key.as_str()) {
            return Err(ConfigError(format!(
                "{ENV_KEY} still holds the placeholder value; set your real access key"
            )));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError(format!(
                "{ENV_URL} must start with http:// or https:// (got {url})"
            )));
        }

        Ok(StoreConfig { url, key })
    }

    /// Reads `SUPABASE_URL` / `SUPABASE_ANON_KEY` directly. The CLI
    /// normally goes through its own flag/env layering and calls
    /// [`StoreConfig::new`]; this is for embedding the library.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var(ENV_URL).map_err(|_| ConfigError(format!("{ENV_URL} is not set")))?;
        let key = env::var(ENV_KEY).map_err(|_| ConfigError(format!("{ENV_KEY} is not set")))?;
        StoreConfig::new(url, key)
    }

    /// Key rendering safe for console output.
    pub fn masked_key(&self) -> String {
        if self.key.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...{}", &self.key[..3], &self.key[self.key.len() - 3..])
    }
}
