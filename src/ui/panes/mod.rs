//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`records`]: table of every student in the store
//! - [`transcript`]: scrollback of session output and echoed input
//! - [`input`]: the active prompt and the line being typed
//! - [`status`]: status bar with store usage and keybindings
//!
//! Each pane module exports a primary `render_*` function that takes the
//! frame, its area, and the slice of screen state it draws. Scroll offsets are
//! passed by `&mut` so the render function can clamp them to the content.

pub mod input;
pub mod records;
pub mod status;
pub mod transcript;

pub use input::render_input_pane;
pub use records::{render_records_pane, RecordRow};
pub use status::render_status_bar;
pub use transcript::{render_transcript_pane, Transcript};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp a top-line scroll offset so the last page stays full
fn clamp_scroll(scroll_offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *scroll_offset = (*scroll_offset).min(total - visible);
    } else {
        *scroll_offset = 0;
    }
}
