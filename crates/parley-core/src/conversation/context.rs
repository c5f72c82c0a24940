//! Context assembly: the bounded message window sent per request.
//!
//! The assembled context is a derived view, recomputed per request and never
//! stored: one system entry, at most `history_window` stored turns
//! oldest-first, and the new user message. The `history_window + 2` length
//! bound is a deliberate token/cost control, not incidental.

use parley_types::llm::Message;
use parley_types::turn::Turn;

/// Builds the ordered message list for the completion dependency.
pub struct ContextAssembler {
    system_prompt: String,
    history_window: usize,
}

impl ContextAssembler {
    pub fn new(system_prompt: impl Into<String>, history_window: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history_window,
        }
    }

    /// How many stored turns are replayed per request.
    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Assemble the context for one request.
    ///
    /// `history` is expected oldest-first; if it holds more than
    /// `history_window` turns, only the most recent window is kept. The
    /// result always starts with the system entry, ends with the new user
    /// entry, and never exceeds `history_window + 2` messages.
    pub fn assemble(&self, history: &[Turn], new_message: &str) -> Vec<Message> {
        let skip = history.len().saturating_sub(self.history_window);
        let window = &history[skip..];

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(Message::system(self.system_prompt.clone()));
        for turn in window {
            messages.push(Message {
                role: turn.role.into(),
                content: turn.content.clone(),
            });
        }
        messages.push(Message::user(new_message));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use parley_types::identity::UserId;
    use parley_types::llm::MessageRole;
    use parley_types::turn::{TurnId, TurnRole};

    fn make_turn(id: i64, role: TurnRole, content: &str) -> Turn {
        Turn {
            id: TurnId(id),
            owner: UserId::new(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_history(count: usize) -> Vec<Turn> {
        (0..count)
            .map(|i| {
                let role = if i % 2 == 0 {
                    TurnRole::User
                } else {
                    TurnRole::Assistant
                };
                make_turn(i as i64 + 1, role, &format!("turn {}", i + 1))
            })
            .collect()
    }

    #[test]
    fn test_empty_history_yields_system_plus_message() {
        let assembler = ContextAssembler::new("persona", 10);
        let messages = assembler.assemble(&[], "hello");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "persona");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_history_appears_oldest_first_between_system_and_message() {
        let assembler = ContextAssembler::new("persona", 10);
        let history = make_history(4);
        let messages = assembler.assemble(&history, "next");

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[1].content, "turn 1");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[4].content, "turn 4");
        assert_eq!(messages[5].content, "next");
    }

    #[test]
    fn test_window_drops_oldest_turns() {
        let assembler = ContextAssembler::new("persona", 10);
        let history = make_history(12);
        let messages = assembler.assemble(&history, "next");

        // 1 system + 10 window + 1 new message; the two oldest are gone.
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[1].content, "turn 3");
        assert_eq!(messages[10].content, "turn 12");
    }

    #[test]
    fn test_length_bound_holds_for_any_history_size() {
        let assembler = ContextAssembler::new("persona", 10);
        for count in [0, 1, 9, 10, 11, 50] {
            let history = make_history(count);
            let messages = assembler.assemble(&history, "m");
            assert!(messages.len() <= assembler.history_window() + 2);
            assert_eq!(messages.first().unwrap().role, MessageRole::System);
            assert_eq!(messages.last().unwrap().role, MessageRole::User);
            assert_eq!(messages.last().unwrap().content, "m");
        }
    }

    #[test]
    fn test_configurable_window_size() {
        let assembler = ContextAssembler::new("persona", 12);
        let history = make_history(20);
        let messages = assembler.assemble(&history, "next");
        assert_eq!(messages.len(), 14);
        assert_eq!(messages[1].content, "turn 9");
    }
}
