use crate::catalog::Locale;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_BASE_ENV: &str = "AGENT_CONSOLE_API_BASE";
pub const LOCALE_ENV: &str = "AGENT_CONSOLE_LOCALE";
pub const LOCAL_MODE_ENV: &str = "AGENT_CONSOLE_LOCAL_MODE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api_base: String,
    pub locale: Locale,
    pub local_mode: bool,
    pub recent_activity_limit: usize,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000/api".to_string(),
            locale: Locale::English,
            local_mode: false,
            recent_activity_limit: 5,
            log_level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("agent-console").join("config.json"))
    }

    /// Defaults, then the config file at the default location, then environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config.normalized())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base = api_base;
        }
        if let Some(locale) = lookup(LOCALE_ENV) {
            match locale.trim().to_ascii_lowercase().as_str() {
                "english" | "en" => self.locale = Locale::English,
                "norwegian" | "no" | "nb" => self.locale = Locale::Norwegian,
                other => tracing::warn!(locale = other, "Ignoring unknown locale override"),
            }
        }
        if let Some(local_mode) = lookup(LOCAL_MODE_ENV) {
            self.local_mode = matches!(local_mode.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        *self = std::mem::take(self).normalized();
    }

    fn normalized(mut self) -> Self {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        self
    }
}
