// Config module for runtime settings

use crate::constants;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings, read from `hatchery.toml` and overridden by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CurseForge requires a key; without one CurseForge URLs resolve in degraded mode.
    pub curseforge_api_key: Option<String>,
    pub modrinth_api_url: String,
    pub curseforge_api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            curseforge_api_key: None,
            modrinth_api_url: constants::MODRINTH_API.to_string(),
            curseforge_api_url: constants::CURSEFORGE_API.to_string(),
            request_timeout_secs: constants::REQUEST_TIMEOUT_SECS,
        }
    }
}

pub fn config_dir() -> String {
    std::env::var("HATCHERY_DIR").unwrap_or_else(|_| ".".to_string())
}

pub fn config_path() -> PathBuf {
    Path::new(&config_dir()).join(constants::CONFIG_FILE)
}

impl Settings {
    /// Load settings from the config file (if present), then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = Self::from_file(&config_path())?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Read a settings file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e))?;
        Ok(settings.normalized())
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // A blank variable is unset, so it never hides the other name
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) =
            non_blank("HATCHERY_CURSEFORGE_API_KEY").or_else(|| non_blank("CURSEFORGE_API_KEY"))
        {
            self.curseforge_api_key = Some(key);
        }
        if let Some(url) = lookup("HATCHERY_MODRINTH_API_URL") {
            self.modrinth_api_url = url;
        }
        if let Some(url) = lookup("HATCHERY_CURSEFORGE_API_URL") {
            self.curseforge_api_url = url;
        }
        if let Some(secs) = lookup("HATCHERY_REQUEST_TIMEOUT").and_then(|s| s.trim().parse().ok())
        {
            self.request_timeout_secs = secs;
        }

        *self = std::mem::take(self).normalized();
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    // Blank keys count as "not configured"; base URLs never keep a trailing slash.
    fn normalized(mut self) -> Self {
        self.curseforge_api_key = self
            .curseforge_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self.modrinth_api_url = self.modrinth_api_url.trim_end_matches('/').to_string();
        self.curseforge_api_url = self.curseforge_api_url.trim_end_matches('/').to_string();
        self
    }
}
