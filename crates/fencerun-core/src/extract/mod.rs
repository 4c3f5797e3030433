// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use once_cell::sync::Lazy;
use regex::Regex;

use fencerun_common::types::{CodeBlock, DEFAULT_LANGUAGE};

/// opening fence with an optional tag glued to it, then a minimal body up to
/// the nearest closing fence.
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+#-]*)[ \t]*\r?\n(.*?)```").expect("fence pattern is valid")
});

/// every fenced block in document order
pub fn extract_all(text: &str) -> Vec<CodeBlock> {
    FENCE
        .captures_iter(text)
        .map(|cap| {
            let tag = cap.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let language = if tag.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                tag.to_lowercase()
            };
            let source = cap.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            CodeBlock::new(language, source)
        })
        .collect()
}

/// the last fenced block in `text`. models tend to show a broken version
/// before the fixed one, so the latest block is the deliverable.
pub fn extract(text: &str) -> Option<CodeBlock> {
    extract_all(text).pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fence() {
        assert!(extract("just prose, no code here").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_single_tagged_block() {
        let block = extract("here:\n```js\nconsole.log(1)\n```\n").unwrap();
        assert_eq!(block.language, "js");
        assert_eq!(block.source, "console.log(1)");
    }

    #[test]
    fn test_untagged_defaults_to_python() {
        let block = extract("```\nprint('x')\n```").unwrap();
        assert_eq!(block.language, "python");
        assert_eq!(block.source, "print('x')");
    }

    #[test]
    fn test_last_block_wins() {
        let text = "bad:\n```python\nA\n```\nfixed:\n```python\nB\n```\n";
        let block = extract(text).unwrap();
        assert_eq!(block.source, "B");
    }

    #[test]
    fn test_body_is_minimal() {
        let text = "```c\nint a;\n```\nbetween\n```cpp\nint b;\n```";
        let blocks = extract_all(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "c");
        assert_eq!(blocks[0].source, "int a;");
        assert!(!blocks[0].source.contains("between"));
        assert_eq!(blocks[1].language, "cpp");
    }

    #[test]
    fn test_tag_lowercased() {
        let block = extract("```Python\nx = 1\n```").unwrap();
        assert_eq!(block.language, "python");
    }

    #[test]
    fn test_tag_with_symbols() {
        let block = extract("```c++\nint main() {}\n```").unwrap();
        assert_eq!(block.language, "c++");
    }

    #[test]
    fn test_body_trimmed_and_multiline() {
        let block = extract("```bash\n\n  echo a\necho b  \n\n```").unwrap();
        assert_eq!(block.source, "echo a\necho b");
    }

    #[test]
    fn test_crlf_line_endings() {
        let block = extract("```js\r\nlet x = 1;\r\n```").unwrap();
        assert_eq!(block.language, "js");
        assert_eq!(block.source, "let x = 1;");
    }

    #[test]
    fn test_unclosed_fence_ignored() {
        let text = "```python\nA\n```\n```python\nunterminated";
        let block = extract(text).unwrap();
        assert_eq!(block.source, "A");
    }

    #[test]
    fn test_mock_reply_shape() {
        let text = "...\n```python\nprint('hi')\n```";
        let block = extract(text).unwrap();
        assert_eq!(block, CodeBlock::new("python", "print('hi')"));
    }
}
