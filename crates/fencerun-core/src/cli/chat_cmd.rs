// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use anyhow::Result;

use super::ChatArgs;
use crate::config::Config;
use crate::display::TerminalPresenter;
use crate::model::{MockClient, ModelClient, OllamaClient};
use crate::runner::SandboxRunner;
use crate::session::{repl, Session};
use crate::toolchain::ToolchainResolver;

pub async fn run(args: &ChatArgs) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, args);
    config.validate()?;

    let runner = SandboxRunner::new(
        ToolchainResolver::host(),
        config.runner.scratch_dir.clone(),
    );

    let backend = if config.model.mock {
        "mock".to_string()
    } else {
        config.model.name.clone()
    };
    println!("fencerun chat (model: {})", backend);
    println!(
        "type /run [lang] to execute the last code, /runfile <path> to execute a file, \
         /help for more, or /exit to quit\n"
    );

    if config.model.mock {
        start(MockClient, runner, &config).await
    } else {
        start(OllamaClient::from_config(&config), runner, &config).await
    }
}

async fn start<M: ModelClient>(client: M, runner: SandboxRunner, config: &Config) -> Result<()> {
    let mut session = Session::new(client, TerminalPresenter, runner, config);
    repl::run(&mut session).await
}

/// command line flags win over the config file and environment
fn apply_overrides(config: &mut Config, args: &ChatArgs) {
    if let Some(ref model) = args.model {
        config.model.name = model.clone();
    }
    if args.mock {
        config.model.mock = true;
    }
    if let Some(timeout) = args.timeout {
        config.model.timeout_secs = timeout;
    }
}
