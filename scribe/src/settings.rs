//! Settings file and credential resolution.
//!
//! The API key is never compiled in. It is looked up, in order, from an
//! explicit value (the `--api-key` flag), the `ELEVENLABS_API_KEY`
//! environment variable, and the `api_key` entry of the settings file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Secret used to authenticate against the speech-to-text service.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve the key from an explicit value, the environment, or settings.
    pub fn resolve(explicit: Option<&str>, settings: &Settings) -> Result<Self> {
        let env = std::env::var(API_KEY_ENV).ok();
        resolve_with_env(explicit, env.as_deref(), settings)
    }

    /// Read the key from `ELEVENLABS_API_KEY` only.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, &Settings::default())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

fn resolve_with_env(
    explicit: Option<&str>,
    env: Option<&str>,
    settings: &Settings,
) -> Result<ApiKey> {
    let sources = [
        ("argument", explicit),
        ("environment", env),
        ("settings file", settings.api_key.as_deref()),
    ];

    for (source, value) in sources {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            debug!(source, "using API key");
            return ApiKey::new(value);
        }
    }

    Err(Error::MissingApiKey)
}

/// Contents of the optional JSON settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl Settings {
    /// Default location: `<config dir>/scribe/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scribe").join("config.json"))
    }

    /// Load settings from a file. Fails if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid settings in {}: {e}", path.display())))
    }

    /// Load from the default location, treating a missing file as empty settings.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
