//! Munch portrait and mood meter widget

use orc_core::Mood;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::OrcTheme;

/// Sidebar panel showing Munch's face and anger meter
pub struct PortraitWidget<'a> {
    mood: Mood,
    theme: &'a OrcTheme,
}

impl<'a> PortraitWidget<'a> {
    pub fn new(mood: Mood, theme: &'a OrcTheme) -> Self {
        Self { mood, theme }
    }

    /// Meter like `[######...]` filled to the mood value.
    fn meter(&self) -> String {
        let filled = self.mood.value() as usize;
        format!("[{}{}]", "#".repeat(filled), ".".repeat(9 - filled))
    }
}

impl Widget for PortraitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Munch ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let mood_style = Style::default().fg(self.theme.mood_color(self.mood));

        let mut lines: Vec<Line> = Vec::new();
        for face_line in self.mood.face().lines() {
            lines.push(Line::from(Span::styled(face_line.to_string(), mood_style)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Anger "),
            Span::styled(
                format!("{} {}", self.meter(), self.mood),
                mood_style.add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.mood.descriptor().to_string(),
            self.theme.system_style(),
        )));

        let paragraph = Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: false });
        paragraph.render(inner, buf);
    }
}
