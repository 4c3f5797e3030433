// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// a required interpreter or compiler is not on the search path
    #[error("{tool} not found on PATH. {hint}")]
    ToolNotFound { tool: String, hint: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No code to run yet")]
    NoCachedCode,

    #[error("No code block found in model reply")]
    ExtractionEmpty,

    /// anything else that went wrong while preparing or running code
    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn tool_not_found(tool: &str, hint: &str) -> Self {
        Error::ToolNotFound {
            tool: tool.to_string(),
            hint: hint.to_string(),
        }
    }

    /// keep the toolchain and launch failures as they are, fold every other
    /// failure into `Unexpected`
    pub fn into_runtime(self) -> Self {
        match self {
            kept @ (Error::ToolNotFound { .. }
            | Error::ProcessLaunch { .. }
            | Error::Unexpected(_)) => kept,
            other => Error::Unexpected(other.to_string()),
        }
    }
}
