// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// tag assumed for fences that carry no language
pub const DEFAULT_LANGUAGE: &str = "python";

/// placeholder shown when a program printed nothing
pub const NO_OUTPUT: &str = "[No output]";

/// languages the runner knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Js,
    Bash,
    C,
    Cpp,
    /// anything else; shown, never executed
    Text,
}

impl Language {
    /// map a fence tag or a `/run <lang>` argument to a language.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "python" | "py" | "python3" => Language::Python,
            "js" | "javascript" | "node" => Language::Js,
            "bash" | "sh" | "shell" => Language::Bash,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" | "cc" => Language::Cpp,
            _ => Language::Text,
        }
    }

    /// infer the language of a file on disk. unknown extensions run as python.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "py" => Language::Python,
            "js" => Language::Js,
            "sh" => Language::Bash,
            "c" => Language::C,
            "cpp" | "cc" | "cxx" => Language::Cpp,
            _ => Language::Python,
        }
    }

    /// file extension (with the dot) used when materialising source
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => ".py",
            Language::Js => ".js",
            Language::Bash => ".sh",
            Language::C => ".c",
            Language::Cpp => ".cpp",
            Language::Text => ".txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Js => "js",
            Language::Bash => "bash",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Text => "text",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a fenced code block pulled out of a model reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// lowercased fence tag, `python` when the fence had none
    pub language: String,
    /// block body, trimmed
    pub source: String,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            source: source.into(),
        }
    }
}

/// code to execute, built at the moment a run is requested
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub language: String,
    pub source: String,
    /// where the code came from when it was read off disk
    pub path: Option<PathBuf>,
}

impl RunRequest {
    pub fn from_block(block: &CodeBlock) -> Self {
        Self {
            language: block.language.clone(),
            source: block.source.clone(),
            path: None,
        }
    }

    pub fn from_file(path: PathBuf, source: String) -> Self {
        Self {
            language: Language::from_path(&path).as_str().to_string(),
            source,
            path: Some(path),
        }
    }
}

/// outcome of one run; `combined_output` is never empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub combined_output: String,
    pub succeeded: bool,
    pub diagnostic: Option<String>,
}

impl ExecutionResult {
    /// build a result from captured text, substituting the no-output marker.
    pub fn completed(output: &str, succeeded: bool) -> Self {
        let trimmed = output.trim();
        let combined_output = if trimmed.is_empty() {
            NO_OUTPUT.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            combined_output,
            succeeded,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            combined_output: diagnostic.clone(),
            succeeded: false,
            diagnostic: Some(diagnostic),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// a conversation turn for chat history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}
