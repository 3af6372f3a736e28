//! Records table pane

use super::{border_style, clamp_scroll};
use crate::records::student::Student;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Marker for a semester slot that has not been entered
const INACTIVE_SEMESTER: &str = "·";

/// A student as shown in the table, detached from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub major: String,
    /// Active semester numbers, e.g. `1 2 · 4`
    pub semesters: String,
    pub subjects: usize,
}

impl From<&Student> for RecordRow {
    fn from(student: &Student) -> Self {
        let semesters: Vec<String> = student
            .semesters()
            .iter()
            .map(|s| {
                if s.is_active() {
                    s.number().to_string()
                } else {
                    INACTIVE_SEMESTER.to_string()
                }
            })
            .collect();

        RecordRow {
            id: student.id().to_string(),
            name: student.name().to_string(),
            age: student.age(),
            major: student.major().to_string(),
            semesters: semesters.join(" "),
            subjects: student.semesters().iter().map(|s| s.subjects().len()).sum(),
        }
    }
}

/// Render the records table
pub fn render_records_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[RecordRow],
    capacity: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Students ({}/{}) ", rows.len(), capacity))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no students)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders plus the header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    clamp_scroll(scroll_offset, rows.len(), visible_height);

    let body: Vec<Row> = rows
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|r| {
            Row::new(vec![
                r.id.clone(),
                r.name.clone(),
                r.age.to_string(),
                r.major.clone(),
                r.semesters.clone(),
                r.subjects.to_string(),
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let header = Row::new(vec!["ID", "Name", "Age", "Major", "Sems", "Subj"]).style(
        Style::default()
            .fg(DEFAULT_THEME.header)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(12),
        Constraint::Min(10),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(7),
        Constraint::Length(4),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}
