// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

/// one line of user input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    Help,
    /// `/run` with an optional language override
    Run(Option<String>),
    RunFile(String),
    Open(String),
    SendFile(String),
    Debug(String),
    /// a slash command that needs an argument and got none
    Usage(&'static str),
    Prompt(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let lower = line.to_lowercase();
        if matches!(lower.as_str(), "/exit" | "exit" | "quit") {
            return Command::Exit;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match head.to_lowercase().as_str() {
            "/clear" if arg.is_none() => Command::Clear,
            "/help" if arg.is_none() => Command::Help,
            "/run" => Command::Run(arg),
            "/runfile" => arg.map_or(Command::Usage("/runfile <path>"), Command::RunFile),
            "/open" => arg.map_or(Command::Usage("/open <path>"), Command::Open),
            "/sendfile" => arg.map_or(Command::Usage("/sendfile <path>"), Command::SendFile),
            "/debug" => arg.map_or(Command::Usage("/debug <path>"), Command::Debug),
            _ => Command::Prompt(line.to_string()),
        }
    }
}

/// true when a `/run` argument looks like a file path rather than a language
pub fn looks_like_path(arg: &str) -> bool {
    arg.contains('/') || arg.contains('\\') || arg.contains('.')
}

pub const HELP: &str = "\
commands:
  /run [lang]        run the last detected code block (optionally as another language)
  /runfile <path>    run a file from disk
  /open <path>       show a file and make it the code for /run
  /sendfile <path>   send a file to the model as part of the conversation
  /debug <path>      ask the model to fix a file, overwriting it in place
  /clear             forget the conversation history
  /help              show this list
  /exit              quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_variants() {
        assert_eq!(Command::parse("/exit"), Command::Exit);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("  QUIT "), Command::Exit);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Command::parse("   "), Command::Empty);
    }

    #[test]
    fn test_run_with_and_without_language() {
        assert_eq!(Command::parse("/run"), Command::Run(None));
        assert_eq!(Command::parse("/run js"), Command::Run(Some("js".into())));
    }

    #[test]
    fn test_runfile_not_confused_with_run() {
        assert_eq!(
            Command::parse("/runfile src/a.py"),
            Command::RunFile("src/a.py".into())
        );
        assert_eq!(Command::parse("/runfile"), Command::Usage("/runfile <path>"));
    }

    #[test]
    fn test_path_with_spaces_kept_whole() {
        assert_eq!(
            Command::parse("/open my dir/a b.py"),
            Command::Open("my dir/a b.py".into())
        );
    }

    #[test]
    fn test_file_commands() {
        assert_eq!(Command::parse("/sendfile x.c"), Command::SendFile("x.c".into()));
        assert_eq!(Command::parse("/debug x.c"), Command::Debug("x.c".into()));
        assert_eq!(Command::parse("/debug"), Command::Usage("/debug <path>"));
    }

    #[test]
    fn test_clear_and_help() {
        assert_eq!(Command::parse("/clear"), Command::Clear);
        assert_eq!(Command::parse("/help"), Command::Help);
    }

    #[test]
    fn test_free_text_and_unknown_commands_are_prompts() {
        assert_eq!(
            Command::parse("write fizzbuzz"),
            Command::Prompt("write fizzbuzz".into())
        );
        assert_eq!(
            Command::parse("/explain this"),
            Command::Prompt("/explain this".into())
        );
    }

    #[test]
    fn test_looks_like_path() {
        assert!(looks_like_path("a.py"));
        assert!(looks_like_path("src/main"));
        assert!(looks_like_path("C:\\x"));
        assert!(!looks_like_path("python"));
        assert!(!looks_like_path("cpp"));
    }
}
