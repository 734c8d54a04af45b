//! Conversation history.
//!
//! An append-only, role-tagged log of everything said in the current game.
//! It is rendered verbatim into model prompts; the only windowing applied
//! anywhere is a last-N slice for the mood-classification sub-prompt.

use serde::{Deserialize, Serialize};

/// The line the game opens (and re-opens) with.
pub const SEED_LINE: &str =
    "GRAAAH! Who dare come to Munch's cave? Speak fast or Munch smash!";

/// Who said an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Player,
    Munch,
}

impl Speaker {
    /// The role tag used when rendering prompts.
    pub fn tag(self) -> &'static str {
        match self {
            Speaker::Player => "User",
            Speaker::Munch => "Munch",
        }
    }
}

/// One line of conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

/// The full conversation of one game, seeded with Munch's opening line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Utterance>,
}

impl History {
    /// A fresh history holding exactly the seed line.
    pub fn new() -> Self {
        Self {
            entries: vec![Utterance {
                speaker: Speaker::Munch,
                text: SEED_LINE.to_string(),
            }],
        }
    }

    /// Drop everything and restore the single seed entry.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(Utterance {
            speaker,
            text: text.into(),
        });
    }

    pub fn push_player(&mut self, text: impl Into<String>) {
        self.push(Speaker::Player, text);
    }

    pub fn push_munch(&mut self, text: impl Into<String>) {
        self.push(Speaker::Munch, text);
    }

    pub fn entries(&self) -> &[Utterance] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.entries.last()
    }

    /// The last `n` entries, oldest first.
    pub fn window(&self, n: usize) -> &[Utterance] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Render the whole history as role-tagged prompt text.
    pub fn render(&self) -> String {
        render_entries(&self.entries)
    }

    /// Render only the last `n` entries.
    pub fn render_window(&self, n: usize) -> String {
        render_entries(self.window(n))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

fn render_entries(entries: &[Utterance]) -> String {
    entries
        .iter()
        .map(|u| format!("{}: {}", u.speaker.tag(), u.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holds_only_seed() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        let seed = history.last().unwrap();
        assert_eq!(seed.speaker, Speaker::Munch);
        assert_eq!(seed.text, SEED_LINE);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut history = History::new();
        history.push_player("hello");
        history.push_munch("WHAT?");
        history.reset();
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().text, SEED_LINE);
    }

    #[test]
    fn test_window_shorter_than_history() {
        let mut history = History::new();
        for i in 0..10 {
            history.push_player(format!("line {i}"));
        }
        let window = history.window(6);
        assert_eq!(window.len(), 6);
        assert_eq!(window[5].text, "line 9");
        assert_eq!(window[0].text, "line 4");
    }

    #[test]
    fn test_window_longer_than_history() {
        let history = History::new();
        assert_eq!(history.window(6).len(), 1);
    }

    #[test]
    fn test_render_role_tags() {
        let mut history = History::new();
        history.push_player("give me gold");
        let rendered = history.render();
        assert!(rendered.starts_with("Munch: "));
        assert!(rendered.ends_with("User: give me gold"));
    }
}
