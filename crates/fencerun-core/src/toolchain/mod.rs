// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

//! maps a language to the concrete program invocations that run a source
//! file on this host. nothing here spawns a process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fencerun_common::types::Language;
use fencerun_common::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Posix,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Posix
        }
    }
}

/// finds executables by name
pub trait ToolLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// searches the PATH of the running process
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

/// one program with its argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// run each step in order; a step only runs when the previous one
    /// exited successfully
    Steps(Vec<Invocation>),
    /// print the file instead of executing it
    ShowFile(PathBuf),
}

pub struct ToolchainResolver {
    os: HostOs,
    locator: Box<dyn ToolLocator + Send + Sync>,
}

impl ToolchainResolver {
    pub fn new(os: HostOs, locator: Box<dyn ToolLocator + Send + Sync>) -> Self {
        Self { os, locator }
    }

    /// resolver for the running host, searching PATH
    pub fn host() -> Self {
        Self::new(HostOs::current(), Box::new(PathLocator))
    }

    /// first of `candidates` found by the locator
    fn find(&self, candidates: &[&str], hint: &str) -> Result<PathBuf> {
        candidates
            .iter()
            .find_map(|tool| self.locator.locate(tool))
            .ok_or_else(|| Error::tool_not_found(&candidates.join("/"), hint))
    }

    pub fn resolve(&self, language: Language, file: &Path) -> Result<CommandSpec> {
        let spec = match language {
            Language::Python => {
                let candidates: &[&str] = match self.os {
                    HostOs::Windows => &["python", "py"],
                    HostOs::Posix => &["python3", "python"],
                };
                let python = self.find(candidates, "Install Python 3 and make sure it is on PATH.")?;
                CommandSpec::Steps(vec![Invocation::new(python).arg(file)])
            }
            Language::Js => {
                let node = self.find(&["node"], "Install Node.js from https://nodejs.org.")?;
                CommandSpec::Steps(vec![Invocation::new(node).arg(file)])
            }
            Language::Bash => match self.os {
                HostOs::Windows => {
                    let shell = self.find(
                        &["powershell", "pwsh"],
                        "Install PowerShell or run the script from WSL.",
                    )?;
                    CommandSpec::Steps(vec![Invocation::new(shell).arg("-File").arg(file)])
                }
                HostOs::Posix => {
                    let bash = self.find(&["bash"], "Install bash with your package manager.")?;
                    CommandSpec::Steps(vec![Invocation::new(bash).arg(file)])
                }
            },
            Language::C => self.compile_then_run("gcc", file)?,
            Language::Cpp => self.compile_then_run("g++", file)?,
            Language::Text => CommandSpec::ShowFile(file.to_path_buf()),
        };
        tracing::debug!("resolved {} for {}: {:?}", language, file.display(), spec);
        Ok(spec)
    }

    fn compile_then_run(&self, compiler: &str, file: &Path) -> Result<CommandSpec> {
        let compiler = self.find(
            &[compiler],
            "Install a GCC toolchain (build-essential, Xcode command line tools or MinGW).",
        )?;
        let exe = self.executable_for(file);
        Ok(CommandSpec::Steps(vec![
            Invocation::new(compiler).arg(file).arg("-o").arg(&exe),
            Invocation::new(exe),
        ]))
    }

    /// compiled binary path: the source path without its extension
    pub fn executable_for(&self, file: &Path) -> PathBuf {
        let stem = file.with_extension("");
        match self.os {
            HostOs::Windows => stem.with_extension("exe"),
            HostOs::Posix => stem,
        }
    }
}
