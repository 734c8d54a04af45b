//! Main application state and logic

use std::path::PathBuf;

use orc_core::{GameSession, Mood, Phase, TurnOutcome, TurnReport};

use crate::ui::theme::OrcTheme;
use crate::ui::widgets::narrative::{NarrativeItem, NarrativeKind};

/// Input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - free text input
    Insert,
}

/// Main application state
pub struct App {
    pub session: GameSession,

    // UI state
    pub theme: OrcTheme,

    // Narrative display
    pub narrative_history: Vec<NarrativeItem>,
    pub narrative_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,

    // Turn processing
    pub busy: bool,
    pub animation_frame: u8,

    // Deferred work picked up by the main loop between draws
    pub pending_input: Option<String>,
    pub pending_save: Option<PathBuf>,
}

impl App {
    /// Create the application around a fresh session.
    pub fn new(session: GameSession) -> Self {
        let mut app = Self {
            session,
            theme: OrcTheme::default(),
            narrative_history: Vec::new(),
            narrative_scroll: 0,
            scroll_locked_to_bottom: true,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            status_message: None,
            busy: false,
            animation_frame: 0,
            pending_input: None,
            pending_save: None,
        };

        app.push_seed();
        app.add_narrative(
            "Press 'i' to speak, 'r' to restart, 's' to save the transcript, 'q' to quit."
                .to_string(),
            NarrativeKind::System,
        );

        app
    }

    fn push_seed(&mut self) {
        if let Some(seed) = self.session.history().last() {
            self.add_narrative(seed.text.clone(), NarrativeKind::Munch);
        }
    }

    pub fn mood(&self) -> Mood {
        self.session.mood()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Add a narrative entry
    pub fn add_narrative(&mut self, content: String, kind: NarrativeKind) {
        self.narrative_history.push(NarrativeItem { content, kind });
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Fold one finished turn into the display.
    pub fn apply_report(&mut self, report: TurnReport) {
        match report.outcome {
            TurnOutcome::Continue => {
                if let Some(reply) = report.reply {
                    self.add_narrative(reply, NarrativeKind::Munch);
                }
                self.clear_status();
            }
            TurnOutcome::Victory => {
                if let Some(reply) = report.reply {
                    self.add_narrative(reply, NarrativeKind::Munch);
                }
                self.add_narrative(
                    "Munch accepts the amulet. You win! Press 'r' to play again.".to_string(),
                    NarrativeKind::System,
                );
                self.set_status("Victory!");
            }
            TurnOutcome::GameOver => {
                if let Some(reply) = report.reply {
                    self.add_narrative(reply, NarrativeKind::Munch);
                }
                self.add_narrative(
                    "Munch smashed you flat. Press 'r' to try again.".to_string(),
                    NarrativeKind::System,
                );
                self.set_status("Game over.");
            }
            TurnOutcome::Rejected => {
                self.set_status("Munch is still busy with your last words.");
            }
        }
    }

    /// Start a fresh game.
    pub fn restart(&mut self) {
        self.session.restart();
        self.narrative_history.clear();
        self.push_seed();
        self.scroll_to_bottom();
        self.set_status(format!("New game. {}", self.mood().descriptor()));
    }

    /// Scroll narrative to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget will cap it to actual max_scroll
        self.narrative_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Estimate max scroll based on narrative content
    /// Uses conservative estimate assuming ~60 char effective width
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .narrative_history
            .iter()
            .map(|item| {
                item.content
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
                    + 1 // blank line between entries
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll narrative up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.narrative_scroll > max_scroll {
            self.narrative_scroll = max_scroll;
        }
        self.narrative_scroll = self.narrative_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll narrative down
    pub fn scroll_down(&mut self, lines: usize) {
        self.narrative_scroll = self.narrative_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.narrative_scroll = self.narrative_scroll.min(max_scroll + 100);
        // Re-lock only via G
    }

    /// Submit current input
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.trim().is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        Some(input)
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        let char_count = self.input_buffer.chars().count();
        if self.cursor_position < char_count {
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Tick for the thinking indicator
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}
