// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use dialoguer::Confirm;

/// where the session sends everything the user sees. passed into the
/// session explicitly so tests can capture output.
pub trait Presenter {
    /// status lines ("Running file ...", "Memory cleared")
    fn notice(&mut self, message: &str);
    /// failures; always visible, never fatal
    fn error(&mut self, message: &str);
    fn assistant(&mut self, text: &str);
    /// a detected or opened code block
    fn code(&mut self, language: &str, source: &str);
    /// output of an executed program
    fn program_output(&mut self, output: &str);
    fn confirm(&mut self, question: &str) -> bool;
}

/// plain stdout/stderr presenter
#[derive(Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn notice(&mut self, message: &str) {
        println!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}\n", message);
    }

    fn assistant(&mut self, text: &str) {
        println!("\nassistant> {}\n", text);
    }

    fn code(&mut self, language: &str, source: &str) {
        println!("--- {} ---", language);
        println!("{}", source);
        println!("---\n");
    }

    fn program_output(&mut self, output: &str) {
        println!("\nprogram output:");
        println!("{}\n", output);
    }

    fn confirm(&mut self, question: &str) -> bool {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
