// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::io::Read;

use anyhow::{Context, Result};

use fencerun_common::Error;

use crate::extract::extract;

pub fn run(path: Option<&str>) -> Result<()> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Error reading file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let block = extract(&text).ok_or(Error::ExtractionEmpty)?;
    eprintln!("language: {}", block.language);
    println!("{}", block.source);
    Ok(())
}
