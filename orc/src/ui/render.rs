//! Render orchestration for the orc TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use orc_core::Phase;

use crate::app::{App, InputMode};
use crate::ui::layout::AppLayout;
use crate::ui::widgets::{InputWidget, NarrativeWidget, PortraitWidget};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let narrative_widget = NarrativeWidget::new(&app.narrative_history, &app.theme)
        .scroll(app.narrative_scroll)
        .thinking(app.busy.then_some(app.animation_frame));
    frame.render_widget(narrative_widget, layout.narrative_area);

    let portrait_widget = PortraitWidget::new(app.mood(), &app.theme);
    frame.render_widget(portrait_widget, layout.sidebar_area);

    render_status_bar(frame, app, layout.status_area);
    render_input(frame, app, layout.input_area);
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::WaitingForUser => "waiting",
        Phase::CheckingAmulet => "eyeing your hands",
        Phase::AssessingMood => "sizing you up",
        Phase::GeneratingResponse => "thinking",
        Phase::GameOver => "GAME OVER",
        Phase::Victory => "VICTORY",
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Munch the Orc | {} ", phase_label(app.phase()));

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled("NORMAL", Style::default().fg(Color::Blue)),
        InputMode::Insert => Span::styled("INSERT", Style::default().fg(Color::Green)),
    };

    let message = app.status_message().unwrap_or("i: speak  r: restart  s: save  q: quit");

    let line = Line::from(vec![
        mode,
        Span::raw(" | "),
        Span::styled(
            app.mood().descriptor(),
            Style::default().fg(app.theme.mood_color(app.mood())),
        ),
        Span::raw(" | "),
        Span::styled(message.to_string(), app.theme.system_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let placeholder = if app.busy {
        "Munch is thinking..."
    } else if app.session.is_over() {
        "Press 'r' to play again"
    } else {
        "Say something to Munch..."
    };

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(matches!(app.input_mode, InputMode::Insert))
        .placeholder(placeholder);

    frame.render_widget(input_widget, area);
}
