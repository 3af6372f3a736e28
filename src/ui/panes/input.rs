//! Input line pane

use super::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the prompt and the text typed so far.
///
/// The cursor is placed after the typed text only while input is awaited.
pub fn render_input_pane(frame: &mut Frame, area: Rect, prompt: &str, input: &str, waiting: bool) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_style(border_style(waiting));
    let inner = block.inner(area);

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(input, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if waiting && inner.width > 0 && inner.height > 0 {
        let typed = (prompt.chars().count() + input.chars().count()) as u16;
        let x = inner.x + typed.min(inner.width - 1);
        frame.set_cursor_position((x, inner.y));
    }
}
