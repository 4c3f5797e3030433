// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// ollama model tag passed to `ollama run`
    #[serde(default = "default_model_name")]
    pub name: String,
    /// how long a single model query may take before it is abandoned
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// answer with a canned reply instead of calling ollama
    #[serde(default)]
    pub mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// parent directory for per-run scratch directories. OS temp dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    /// ask before `/debug` overwrites a file
    #[serde(default)]
    pub confirm_overwrite: bool,
}

fn default_model_name() -> String {
    "deepseek-coder".into()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_history_turns() -> usize {
    8
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            timeout_secs: default_timeout_secs(),
            mock: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_turns: default_history_turns(),
        }
    }
}
