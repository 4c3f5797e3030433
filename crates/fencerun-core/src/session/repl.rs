// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{Flow, Session};
use crate::display::Presenter;
use crate::model::ModelClient;

/// read lines until exit, ctrl-c or ctrl-d. ctrl-c while a command is in
/// flight abandons that command (killing any child it spawned) and returns to
/// the prompt.
pub async fn run<M: ModelClient, P: Presenter>(session: &mut Session<M, P>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => {
                session.presenter_mut().notice("\n[Interrupted]");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        editor.add_history_entry(input)?;

        let outcome = tokio::select! {
            flow = session.handle(input) => Some(flow),
            _ = tokio::signal::ctrl_c() => None,
        };

        match outcome {
            Some(Flow::Exit) => break,
            Some(Flow::Continue) => {}
            None => {
                tracing::debug!("command interrupted");
                session.presenter_mut().notice("\n[Interrupted]");
            }
        }
    }

    Ok(())
}
