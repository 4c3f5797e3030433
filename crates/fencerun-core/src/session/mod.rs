// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

mod command;
mod history;
mod prompt;
pub mod repl;

use std::path::{Path, PathBuf};

use fencerun_common::types::{CodeBlock, ExecutionResult, Language, Role, RunRequest};
use fencerun_common::{Error, Result};

use crate::config::Config;
use crate::display::Presenter;
use crate::extract::extract;
use crate::model::ModelClient;
use crate::runner::SandboxRunner;

use command::{looks_like_path, Command, HELP};
use history::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// the interactive command dispatcher. holds the conversation and the most
/// recently detected code block; one input is handled to completion before
/// the next is read.
pub struct Session<M, P> {
    client: M,
    presenter: P,
    runner: SandboxRunner,
    history: History,
    last_code: Option<CodeBlock>,
    confirm_overwrite: bool,
    cwd: PathBuf,
}

impl<M: ModelClient, P: Presenter> Session<M, P> {
    pub fn new(client: M, presenter: P, runner: SandboxRunner, config: &Config) -> Self {
        Self {
            client,
            presenter,
            runner,
            history: History::new(config.session.history_turns),
            last_code: None,
            confirm_overwrite: config.debug.confirm_overwrite,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// resolve relative paths against `cwd` instead of the process directory
    #[cfg(test)]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// handle one line of input. every failure is reported through the
    /// presenter; only `Flow::Exit` ends the loop.
    pub async fn handle(&mut self, line: &str) -> Flow {
        let result = match Command::parse(line) {
            Command::Empty => Ok(()),
            Command::Exit => return Flow::Exit,
            Command::Clear => {
                self.history.clear();
                self.presenter.notice("Memory cleared");
                Ok(())
            }
            Command::Help => {
                self.presenter.notice(HELP);
                Ok(())
            }
            Command::Usage(usage) => {
                self.presenter.error(&format!("Usage: {}", usage));
                Ok(())
            }
            Command::Run(language) => self.run_cached(language.as_deref()).await,
            Command::RunFile(path) => self.run_file(&path).await,
            Command::Open(path) => self.open(&path),
            Command::SendFile(path) => self.send_file(&path).await,
            Command::Debug(path) => self.debug_file(&path).await,
            Command::Prompt(text) => {
                self.chat(&text).await;
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::debug!("command failed: {:?}", e);
            self.presenter.error(&e.to_string());
        }
        Flow::Continue
    }

    async fn run_cached(&mut self, language: Option<&str>) -> Result<()> {
        if let Some(arg) = language.filter(|a| looks_like_path(a)) {
            self.presenter.error(&format!(
                "'{}' looks like a file path. Use /runfile <path> to run a file.",
                arg
            ));
            return Ok(());
        }
        let block = self.last_code.as_ref().ok_or(Error::NoCachedCode)?;
        let mut request = RunRequest::from_block(block);
        if let Some(language) = language {
            request.language = language.to_lowercase();
        }

        self.presenter
            .notice(&format!("Running last code as {}...", request.language));
        self.execute(request).await;
        Ok(())
    }

    async fn run_file(&mut self, path: &str) -> Result<()> {
        let (path, source) = self.read_source(path)?;
        let request = RunRequest::from_file(path, source);

        if let Some(ref path) = request.path {
            self.presenter.notice(&format!(
                "Running file {} as {}...",
                path.display(),
                request.language
            ));
        }
        self.execute(request).await;
        Ok(())
    }

    fn open(&mut self, path: &str) -> Result<()> {
        let (path, source) = self.read_source(path)?;
        let language = Language::from_path(&path);

        self.presenter.code(language.as_str(), &source);
        self.presenter.notice(&format!(
            "Loaded {} as {}. Use /run to execute it.",
            path.display(),
            language
        ));
        self.last_code = Some(CodeBlock::new(language.as_str(), source));
        Ok(())
    }

    async fn send_file(&mut self, path: &str) -> Result<()> {
        let (_, source) = self.read_source(path)?;
        self.history.push(Role::User, source);
        self.converse().await;
        Ok(())
    }

    async fn chat(&mut self, text: &str) {
        self.history.push(Role::User, text);
        self.converse().await;
    }

    /// send the full context, record the reply and cache any block in it
    async fn converse(&mut self) {
        tracing::debug!("asking with {} turns of context", self.history.len());
        let reply = self.client.ask(&self.history.prompt()).await;
        self.presenter.assistant(&reply);
        self.history.push(Role::Assistant, reply.clone());
        self.capture(&reply);
    }

    fn capture(&mut self, reply: &str) {
        if let Some(block) = extract(reply) {
            self.presenter
                .notice(&format!("Detected code block ({})", block.language));
            self.presenter.code(&block.language, &block.source);
            self.last_code = Some(block);
        }
    }

    /// ask the model to fix a file out of band and overwrite it with the
    /// corrected version. the conversation history is not touched.
    async fn debug_file(&mut self, path: &str) -> Result<()> {
        let (path, original) = self.read_source(path)?;
        let language = Language::from_path(&path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.presenter
            .notice(&format!("Asking the model to debug {}...", path.display()));
        let prompt = prompt::build_debug_prompt(language.as_str(), &file_name, &original);
        let reply = self.client.ask(&prompt).await;

        let Some(fixed) = extract(&reply) else {
            self.presenter.error(&format!(
                "{}; {} left unmodified",
                Error::ExtractionEmpty,
                path.display()
            ));
            return Ok(());
        };

        if fixed.source.trim() == original.trim() {
            self.presenter
                .notice(&format!("No issues found in {}", path.display()));
            return Ok(());
        }

        if self.confirm_overwrite
            && !self
                .presenter
                .confirm(&format!("Overwrite {} with the corrected code?", path.display()))
        {
            self.presenter
                .notice(&format!("{} left unmodified", path.display()));
            return Ok(());
        }

        std::fs::write(&path, format!("{}\n", fixed.source))?;
        tracing::info!("overwrote {} with corrected code", path.display());

        self.presenter.code(language.as_str(), &fixed.source);
        self.presenter.notice(&format!(
            "Fixed {}. Use /run to execute the corrected code.",
            path.display()
        ));
        self.last_code = Some(CodeBlock::new(language.as_str(), fixed.source));
        Ok(())
    }

    fn read_source(&self, path: &str) -> Result<(PathBuf, String)> {
        let path = self.resolve_path(path);
        if !path.exists() {
            return Err(Error::FileNotFound(path));
        }
        let source = std::fs::read_to_string(&path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        Ok((path, source))
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    async fn execute(&mut self, request: RunRequest) {
        let result = self.runner.run(&request.language, &request.source).await;
        self.show_result(result);
    }

    fn show_result(&mut self, result: ExecutionResult) {
        match result.diagnostic {
            Some(diagnostic) => self.presenter.error(&diagnostic),
            None => self.presenter.program_output(&result.combined_output),
        }
    }
}
