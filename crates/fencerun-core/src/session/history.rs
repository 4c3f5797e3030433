// SPDX-License-Identifier: GPL-3.0
// Copyright (c) 2026 Matt Hesketh <matt@matthesketh.pro>

use std::collections::VecDeque;

use fencerun_common::types::{ConversationTurn, Role};

/// recent conversation turns, oldest dropped once `capacity` is reached
pub struct History {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(ConversationTurn {
            role,
            content: content.into(),
        });
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[cfg(test)]
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// `ROLE: text` per turn, one per line
    pub fn context(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role.label(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// the prompt sent to the model: recent context plus the assistant cue
    pub fn prompt(&self) -> String {
        format!("{}\n\nAssistant:", self.context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_format() {
        let mut h = History::new(8);
        h.push(Role::User, "hi");
        h.push(Role::Assistant, "hello");
        assert_eq!(h.context(), "USER: hi\nASSISTANT: hello");
        assert_eq!(h.prompt(), "USER: hi\nASSISTANT: hello\n\nAssistant:");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut h = History::new(3);
        for i in 0..5 {
            h.push(Role::User, format!("m{}", i));
        }
        assert_eq!(h.len(), 3);
        let contents: Vec<_> = h.turns().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_clear() {
        let mut h = History::new(2);
        h.push(Role::User, "x");
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.context(), "");
    }

    #[test]
    fn test_zero_capacity_still_holds_latest() {
        let mut h = History::new(0);
        h.push(Role::User, "a");
        h.push(Role::User, "b");
        assert_eq!(h.len(), 1);
        assert_eq!(h.context(), "USER: b");
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut history = History::new(usize::MAX / 2);
        history.push(Role::User, "hi");
        assert_eq!(history.len(), 1);
        assert_eq!(history.context(), "USER: hi");
    }
}
