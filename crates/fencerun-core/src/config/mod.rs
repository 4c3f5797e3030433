// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

mod sections;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sections::{DebugConfig, ModelConfig, RunnerConfig, SessionConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("fencerun")
            .join("config.toml")
    }

    /// load the config file (defaults when absent), then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// the config file alone, without environment overrides. this is what
    /// `config set` edits and saves back.
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| "failed to parse config")?;
        Ok(config)
    }

    /// OLLAMA_MOCK and OLLAMA_TIMEOUT override the file. an unparsable
    /// timeout is ignored.
    pub(crate) fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(mock) = var("OLLAMA_MOCK") {
            self.model.mock = matches!(mock.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(timeout) = var("OLLAMA_TIMEOUT") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => self.model.timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid OLLAMA_TIMEOUT value: {}", timeout),
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            anyhow::bail!("model.name must not be empty");
        }
        if self.model.timeout_secs == 0 {
            anyhow::bail!("model.timeout_secs must be > 0");
        }
        if self.session.history_turns == 0 {
            anyhow::bail!("session.history_turns must be > 0");
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let content = toml::to_string_pretty(self).with_context(|| "failed to serialise config")?;
        std::fs::write(path, &content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_secs)
    }
}
