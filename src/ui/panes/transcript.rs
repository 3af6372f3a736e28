//! Session transcript pane

use super::{border_style, clamp_scroll};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Oldest lines are dropped past this many
pub const MAX_TRANSCRIPT_LINES: usize = 5_000;

/// Everything the session printed, with submitted input echoed after its prompt
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, one transcript line per `\n`-separated part
    pub fn push(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(str::to_string));
        if self.lines.len() > MAX_TRANSCRIPT_LINES {
            let excess = self.lines.len() - MAX_TRANSCRIPT_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn line_style(line: &str) -> Style {
    let color = if line.starts_with("Error") || line.starts_with("[ERROR]") {
        DEFAULT_THEME.error
    } else if line.starts_with("[WARN]") || line.starts_with("Warning") {
        DEFAULT_THEME.secondary
    } else if line.starts_with("---") || line.starts_with("===") {
        DEFAULT_THEME.primary
    } else if line.ends_with("successfully.") {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.fg
    };
    Style::default().fg(color)
}

/// Render the transcript pane
pub fn render_transcript_pane(
    frame: &mut Frame,
    area: Rect,
    transcript: &Transcript,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Session ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if transcript.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, transcript.len(), visible_height);

    let items: Vec<ListItem> = transcript
        .lines()
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line.as_str()).style(line_style(line)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_splits_and_caps() {
        let mut t = Transcript::new();
        t.push("a\nb");
        assert_eq!(t.lines(), ["a", "b"]);

        for i in 0..MAX_TRANSCRIPT_LINES {
            t.push(&i.to_string());
        }
        assert_eq!(t.len(), MAX_TRANSCRIPT_LINES);
        assert_eq!(t.lines()[0], "0");
        assert_eq!(t.last(), Some((MAX_TRANSCRIPT_LINES - 1).to_string().as_str()));
    }

    #[test]
    fn test_line_colors() {
        assert_eq!(line_style("Error: Invalid ID.").fg, Some(DEFAULT_THEME.error));
        assert_eq!(line_style("[WARN] x").fg, Some(DEFAULT_THEME.secondary));
        assert_eq!(line_style("Alice").fg, Some(DEFAULT_THEME.fg));
    }
}
