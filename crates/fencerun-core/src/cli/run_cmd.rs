// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::path::PathBuf;

use anyhow::Result;

use fencerun_common::types::RunRequest;
use fencerun_common::Error;

use crate::config::Config;
use crate::runner::SandboxRunner;
use crate::toolchain::ToolchainResolver;

pub async fn run(path: &str, lang: Option<&str>, json_output: bool) -> Result<()> {
    let config = Config::load()?;
    let request = load_request(path, lang)?;

    let runner = SandboxRunner::new(
        ToolchainResolver::host(),
        config.runner.scratch_dir.clone(),
    );
    let result = runner.run(&request.language, &request.source).await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(ref diagnostic) = result.diagnostic {
        eprintln!("{}", diagnostic);
    } else {
        println!("{}", result.combined_output);
    }

    if !result.succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn load_request(path: &str, lang: Option<&str>) -> Result<RunRequest> {
    let path = PathBuf::from(path);
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    if !path.exists() {
        return Err(Error::FileNotFound(path).into());
    }
    let source = std::fs::read_to_string(&path).map_err(|source| Error::FileRead {
        path: path.clone(),
        source,
    })?;

    let mut request = RunRequest::from_file(path, source);
    if let Some(lang) = lang {
        request.language = lang.to_lowercase();
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_request_infers_language() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.sh");
        std::fs::write(&file, "echo hi").unwrap();

        let req = load_request(file.to_str().unwrap(), None).unwrap();

        assert_eq!(req.language, "bash");
        assert_eq!(req.source, "echo hi");
        assert_eq!(req.path, Some(file));
    }

    #[test]
    fn test_load_request_language_override() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("snippet.txt");
        std::fs::write(&file, "x").unwrap();

        let req = load_request(file.to_str().unwrap(), Some("JS")).unwrap();

        assert_eq!(req.language, "js");
    }

    #[test]
    fn test_load_request_missing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nonexistent.py");

        let err = load_request(file.to_str().unwrap(), None).unwrap_err();

        assert!(err.to_string().starts_with("File not found"));
    }
}
