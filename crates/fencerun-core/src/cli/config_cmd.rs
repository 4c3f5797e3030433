// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;

pub fn show() -> Result<()> {
    let config = Config::load()?;
    let content = toml::to_string_pretty(&config)?;
    println!("{}", content);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    set_in(&Config::config_path(), key, value)?;
    println!("Set {} = {}", key, value);
    Ok(())
}

/// edit one key of the file at `path`. environment overrides are never
/// written back.
fn set_in(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(path)?;
    apply(&mut config, key, value)?;
    config.validate()?;
    config.save_to(path)
}

pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", Config::config_path().display());
    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "model.name" => {
            config.model.name = value.to_string();
        }
        "model.timeout_secs" => {
            config.model.timeout_secs = value.parse()?;
        }
        "model.mock" => {
            config.model.mock = value.parse()?;
        }
        "session.history_turns" => {
            config.session.history_turns = value.parse()?;
        }
        "runner.scratch_dir" => {
            config.runner.scratch_dir = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "debug.confirm_overwrite" => {
            config.debug.confirm_overwrite = value.parse()?;
        }
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "model.name", "codellama").unwrap();
        apply(&mut config, "model.timeout_secs", "60").unwrap();
        apply(&mut config, "model.mock", "true").unwrap();
        apply(&mut config, "session.history_turns", "12").unwrap();
        apply(&mut config, "runner.scratch_dir", "/var/tmp").unwrap();
        apply(&mut config, "debug.confirm_overwrite", "true").unwrap();

        assert_eq!(config.model.name, "codellama");
        assert_eq!(config.model.timeout_secs, 60);
        assert!(config.model.mock);
        assert_eq!(config.session.history_turns, 12);
        assert_eq!(config.runner.scratch_dir, Some(PathBuf::from("/var/tmp")));
        assert!(config.debug.confirm_overwrite);
    }

    #[test]
    fn test_apply_empty_scratch_dir_clears() {
        let mut config = Config::default();
        config.runner.scratch_dir = Some(PathBuf::from("/x"));
        apply(&mut config, "runner.scratch_dir", "").unwrap();
        assert!(config.runner.scratch_dir.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(apply(&mut config, "query.top_k", "3").is_err());
    }

    #[test]
    fn test_set_ignores_environment_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::env::set_var("OLLAMA_TIMEOUT", "99");
        std::env::set_var("OLLAMA_MOCK", "1");

        let result = set_in(&path, "model.name", "llama3");

        std::env::remove_var("OLLAMA_TIMEOUT");
        std::env::remove_var("OLLAMA_MOCK");
        result.unwrap();
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.model.name, "llama3");
        assert_eq!(saved.model.timeout_secs, 20);
        assert!(!saved.model.mock);
    }

    #[test]
    fn test_set_keeps_other_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        set_in(&path, "session.history_turns", "3").unwrap();
        set_in(&path, "model.timeout_secs", "45").unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.session.history_turns, 3);
        assert_eq!(saved.model.timeout_secs, 45);
    }

    #[test]
    fn test_set_rejects_invalid_value_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_in(&path, "model.timeout_secs", "0").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_apply_rejects_bad_value() {
        let mut config = Config::default();
        assert!(apply(&mut config, "model.timeout_secs", "soon").is_err());
        assert!(apply(&mut config, "model.mock", "maybe").is_err());
    }
}
