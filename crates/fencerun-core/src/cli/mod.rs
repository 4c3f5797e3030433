// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

mod chat_cmd;
mod config_cmd;
mod extract_cmd;
mod run_cmd;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fencerun",
    about = "chat with a local model and run the code it writes"
)]
pub struct Cli {
    #[command(flatten)]
    chat: ChatArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ChatArgs {
    /// ollama model to use (overrides the config file)
    #[arg(long)]
    model: Option<String>,
    /// answer with a canned reply instead of calling ollama
    #[arg(long)]
    mock: bool,
    /// seconds to wait for each model reply
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// interactive chat REPL (the default)
    Chat(ChatArgs),
    /// run a source file once and exit
    Run {
        /// path to the file to run
        path: String,
        /// language to run it as (inferred from the extension by default)
        #[arg(long, short = 'l')]
        lang: Option<String>,
        /// output the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// print the last fenced code block found in a file, or stdin
    Extract {
        /// file to scan (reads stdin when omitted)
        path: Option<String>,
    },
    /// manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// show current configuration
    Show,
    /// set a configuration value
    Set { key: String, value: String },
    /// reset configuration to defaults
    Reset,
    /// print the config file location
    Path,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => chat_cmd::run(&self.chat).await,
            Some(Commands::Chat(args)) => chat_cmd::run(&args).await,
            Some(Commands::Run { path, lang, json }) => {
                run_cmd::run(&path, lang.as_deref(), json).await
            }
            Some(Commands::Extract { path }) => extract_cmd::run(path.as_deref()),
            Some(Commands::Config { action }) => match action {
                ConfigAction::Show => config_cmd::show(),
                ConfigAction::Set { key, value } => config_cmd::set(&key, &value),
                ConfigAction::Reset => config_cmd::reset(),
                ConfigAction::Path => config_cmd::path(),
            },
        }
    }
}
