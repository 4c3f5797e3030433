// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::Config;

/// canned reply used when mocking, with a block the session can run
pub const MOCK_RESPONSE: &str = "Mock assistant response (OLLAMA_MOCK=1 enabled).\n\n\
Here is a sample Python snippet:\n\n\
```python\nprint('Hello from mock Ollama')\n```";

/// something that answers prompts. failures come back as text, so callers
/// treat every reply the same way.
#[allow(async_fn_in_trait)]
pub trait ModelClient {
    async fn ask(&self, prompt: &str) -> String;
}

pub struct MockClient;

impl ModelClient for MockClient {
    async fn ask(&self, _prompt: &str) -> String {
        MOCK_RESPONSE.to_string()
    }
}

/// talks to a local model through `ollama run <model>`
pub struct OllamaClient {
    program: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: "ollama".into(),
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.model.name.clone(), config.model_timeout())
    }

    #[cfg(test)]
    fn with_program(mut self, program: &str) -> Self {
        self.program = program.into();
        self
    }
}

impl ModelClient for OllamaClient {
    async fn ask(&self, prompt: &str) -> String {
        let mut child = match Command::new(&self.program)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return "Error: Ollama not found. Make sure it's installed and in PATH.\n\
                        For development you can set the environment variable OLLAMA_MOCK=1 \
                        to use a mocked response."
                    .to_string();
            }
            Err(e) => return format!("[Error from Ollama]\nfailed to start ollama: {}", e),
        };
        tracing::info!("asking {} ({} chars)", self.model, prompt.len());

        // writing the prompt counts against the timeout too; the child is
        // killed on drop if the timeout fires first
        let exchange = async move {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                    tracing::warn!("failed to write prompt to ollama: {}", e);
                }
                // closing stdin ends the prompt
                drop(stdin);
            }
            child.wait_with_output().await
        };

        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return format!("[Error from Ollama]\n{}", e),
            Err(_) => {
                tracing::warn!("ollama timed out after {:?}", self.timeout);
                return format!(
                    "[Error] Ollama did not respond within {} seconds. \
                     Try setting OLLAMA_MOCK=1 for development or check that the Ollama daemon is running.",
                    self.timeout.as_secs()
                );
            }
        };

        let err = String::from_utf8_lossy(&output.stderr);
        if !err.trim().is_empty() {
            return format!("[Error from Ollama]\n{}", err.trim());
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_reply_contains_block() {
        let reply = MockClient.ask("anything").await;
        let block = crate::extract::extract(&reply).unwrap();
        assert_eq!(block.language, "python");
        assert_eq!(block.source, "print('Hello from mock Ollama')");
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported_as_text() {
        let client = OllamaClient::new("m", Duration::from_secs(1))
            .with_program("fencerun-no-such-ollama-binary");
        let reply = client.ask("hi").await;
        assert!(reply.starts_with("Error: Ollama not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_is_reported_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-ollama");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let client = OllamaClient::new("m", Duration::from_secs(1))
            .with_program(script.to_str().unwrap());

        let reply = client.ask("hi").await;

        assert!(reply.starts_with("[Error] Ollama did not respond within 1 seconds"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_covers_unread_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("deaf-ollama");
        std::fs::write(&script, "#!/bin/sh\nexec sleep 30\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let client = OllamaClient::new("m", Duration::from_secs(1))
            .with_program(script.to_str().unwrap());
        let prompt = "x".repeat(4 * 1024 * 1024);

        let reply = tokio::time::timeout(Duration::from_secs(10), client.ask(&prompt))
            .await
            .expect("ask must give up on its own");

        assert!(reply.starts_with("[Error] Ollama did not respond within 1 seconds"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_returned_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("echo-ollama");
        std::fs::write(&script, "#!/bin/sh\ncat >/dev/null\necho\necho \"model $2\"\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let client = OllamaClient::new("tiny", Duration::from_secs(5))
            .with_program(script.to_str().unwrap());

        assert_eq!(client.ask("prompt").await, "model tiny");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.model.name = "codellama".into();
        config.model.timeout_secs = 7;
        let client = OllamaClient::from_config(&config);
        assert_eq!(client.model, "codellama");
        assert_eq!(client.timeout, Duration::from_secs(7));
    }
}
