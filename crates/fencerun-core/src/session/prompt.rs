// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

const DEBUG_INSTRUCTION: &str = "\
You are a code reviewer. Find and fix any bugs in the following file. \
Reply with ONLY the complete corrected file in a single fenced code block \
tagged with its language. If the file has no issues, return it unchanged \
in the same format. Do not add explanations.";

/// out-of-band prompt for `/debug`; never recorded in the history
pub fn build_debug_prompt(language: &str, file_name: &str, source: &str) -> String {
    format!(
        "{}\n\nFile: {}\n\n```{}\n{}\n```\n\nAssistant:",
        DEBUG_INSTRUCTION, file_name, language, source
    )
}
