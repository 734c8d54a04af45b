//! Color theme and styling for the orc TUI

use orc_core::Mood;
use ratatui::style::{Color, Modifier, Style};

/// Game UI color theme
#[derive(Debug, Clone)]
pub struct OrcTheme {
    // Base colors
    pub border: Color,
    pub border_focused: Color,

    // Mood meter colors
    pub mood_calm: Color,
    pub mood_irritated: Color,
    pub mood_furious: Color,

    // Text colors
    pub player_text: Color,
    pub munch_text: Color,
    pub system_text: Color,
}

impl Default for OrcTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            mood_calm: Color::Green,
            mood_irritated: Color::Yellow,
            mood_furious: Color::Red,

            player_text: Color::Cyan,
            munch_text: Color::Green,
            system_text: Color::DarkGray,
        }
    }
}

impl OrcTheme {
    /// Get style for player lines
    pub fn player_style(&self) -> Style {
        Style::default()
            .fg(self.player_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for Munch's lines
    pub fn munch_style(&self) -> Style {
        Style::default().fg(self.munch_text)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Meter color for a mood level
    pub fn mood_color(&self, mood: Mood) -> Color {
        match mood.value() {
            0..=2 => self.mood_calm,
            3..=5 => self.mood_irritated,
            _ => self.mood_furious,
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
