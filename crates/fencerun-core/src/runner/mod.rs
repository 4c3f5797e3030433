// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::TempDir;
use tokio::process::Command;

use fencerun_common::types::{ExecutionResult, Language};
use fencerun_common::{Error, Result};

use crate::toolchain::{CommandSpec, Invocation, ToolchainResolver};

/// file name for materialised source inside a run's scratch directory
const SNIPPET_STEM: &str = "snippet";

/// executes source text through the host toolchain.
///
/// each run gets its own scratch directory holding the source file and any
/// compiled binary; the directory is removed when the run ends, whatever the
/// outcome. there is no timeout on the executed program.
pub struct SandboxRunner {
    resolver: ToolchainResolver,
    scratch_root: Option<PathBuf>,
}

impl SandboxRunner {
    pub fn new(resolver: ToolchainResolver, scratch_root: Option<PathBuf>) -> Self {
        Self {
            resolver,
            scratch_root,
        }
    }

    /// run `source` as `language`. failures come back as a result carrying a
    /// `Runtime Error` diagnostic, never as an error.
    pub async fn run(&self, language: &str, source: &str) -> ExecutionResult {
        let language = Language::from_tag(language);
        match self.try_run(language, source).await {
            Ok(result) => result,
            Err(e) => {
                let e = e.into_runtime();
                tracing::warn!("run failed: {}", e);
                ExecutionResult::failed(format!("Runtime Error: {}", e))
            }
        }
    }

    async fn try_run(&self, language: Language, source: &str) -> Result<ExecutionResult> {
        let scratch = self.scratch_dir()?;
        let file = scratch
            .path()
            .join(format!("{}{}", SNIPPET_STEM, language.extension()));
        std::fs::write(&file, source)?;
        tracing::debug!("materialised {} source at {}", language, file.display());

        // `scratch` is dropped on every return below, removing the file
        let spec = self.resolver.resolve(language, &file)?;
        match spec {
            CommandSpec::ShowFile(path) => show_file(&path),
            CommandSpec::Steps(steps) => run_steps(&steps, scratch.path()).await,
        }
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("fencerun-");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

fn show_file(path: &Path) -> Result<ExecutionResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(ExecutionResult::completed(&content, true))
}

/// run each step, stopping at the first one that exits unsuccessfully.
/// stdout precedes stderr for every step.
async fn run_steps(steps: &[Invocation], cwd: &Path) -> Result<ExecutionResult> {
    let mut combined = String::new();
    let mut succeeded = true;

    for step in steps {
        tracing::info!("running {}", step.display());
        let output = Command::new(&step.program)
            .args(&step.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::ProcessLaunch {
                program: step.program.display().to_string(),
                source,
            })?;

        combined.push_str(&String::from_utf8_lossy(&output.stdout));
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            tracing::debug!("{} exited with {}", step.display(), output.status);
            succeeded = false;
            break;
        }
    }

    Ok(ExecutionResult::completed(&combined, succeeded))
}
