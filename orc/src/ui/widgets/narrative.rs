//! Conversation display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use crate::ui::theme::OrcTheme;

/// What kind of line an entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeKind {
    Player,
    Munch,
    System,
}

/// A single entry in the conversation display
#[derive(Debug, Clone)]
pub struct NarrativeItem {
    pub content: String,
    pub kind: NarrativeKind,
}

/// Widget for displaying the conversation
pub struct NarrativeWidget<'a> {
    items: &'a [NarrativeItem],
    scroll: usize,
    theme: &'a OrcTheme,
    /// Animation frame for the thinking indicator, when a turn is in flight
    thinking_frame: Option<u8>,
}

impl<'a> NarrativeWidget<'a> {
    pub fn new(items: &'a [NarrativeItem], theme: &'a OrcTheme) -> Self {
        Self {
            items,
            scroll: 0,
            theme,
            thinking_frame: None,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn thinking(mut self, frame: Option<u8>) -> Self {
        self.thinking_frame = frame;
        self
    }

    fn style_for_kind(&self, kind: NarrativeKind) -> Style {
        match kind {
            NarrativeKind::Player => self.theme.player_style(),
            NarrativeKind::Munch => self.theme.munch_style(),
            NarrativeKind::System => self.theme.system_style(),
        }
    }
}

impl Widget for NarrativeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Munch's Cave ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        // Build lines from entries
        let mut lines: Vec<Line> = Vec::new();

        for item in self.items {
            let style = self.style_for_kind(item.kind);

            let prefix = match item.kind {
                NarrativeKind::Player => "> ",
                NarrativeKind::Munch => "",
                NarrativeKind::System => "[ ",
            };
            let suffix = match item.kind {
                NarrativeKind::System => " ]",
                _ => "",
            };

            let text = format!("{}{}{}", prefix, item.content, suffix);
            for line in text.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), style)));
            }

            // Blank line between entries
            lines.push(Line::from(""));
        }

        // Thinking indicator while a turn is in flight
        if let Some(frame) = self.thinking_frame {
            let dots = ".".repeat(1 + (frame / 3 % 3) as usize);
            lines.push(Line::from(Span::styled(
                format!("Munch thinking{dots}"),
                self.theme.munch_style().add_modifier(Modifier::DIM),
            )));
        }

        // Calculate scroll position
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });

        paragraph.render(inner, buf);

        // Scrollbar if content exceeds visible area
        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}
