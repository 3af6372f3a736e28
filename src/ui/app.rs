//! Screen state and the keyboard loop behind each prompt
//!
//! The menu session owns the control flow. Every time it needs a line of
//! input it calls [`Prompter::read_line`] on [`App`], which redraws the screen
//! and handles key presses until the line is submitted or input is closed.

use super::panes::{self, RecordRow, Transcript};
use crate::logging;
use crate::records::store::RecordStore;
use crate::session::Prompter;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Lines moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// Which pane arrow keys scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Records,
    Transcript,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Records => FocusedPane::Transcript,
            FocusedPane::Transcript => FocusedPane::Records,
        }
    }
}

/// What a key press means for the pending prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit(String),
    /// Ctrl-C or Ctrl-D: treat as end of input
    Close,
}

/// Everything drawn on screen
#[derive(Debug)]
pub struct Screen {
    pub rows: Vec<RecordRow>,
    pub capacity: usize,
    pub transcript: Transcript,
    pub prompt: String,
    pub input: String,
    /// A prompt is waiting for a line
    pub waiting: bool,
    pub focused_pane: FocusedPane,
    pub records_scroll: usize,
    /// `usize::MAX` follows the newest line
    pub transcript_scroll: usize,
    pub status_message: String,
    pub file_label: String,
}

impl Screen {
    pub fn new(file_label: impl Into<String>) -> Self {
        Screen {
            rows: Vec::new(),
            capacity: 0,
            transcript: Transcript::new(),
            prompt: String::new(),
            input: String::new(),
            waiting: false,
            focused_pane: FocusedPane::Records,
            records_scroll: 0,
            transcript_scroll: usize::MAX,
            status_message: String::from("Ready!"),
            file_label: file_label.into(),
        }
    }

    /// Copy the store contents into the records table
    pub fn sync(&mut self, store: &RecordStore) {
        self.rows = store.iter().map(RecordRow::from).collect();
        self.capacity = store.capacity();
    }

    /// Append output and jump to the newest line
    pub fn show(&mut self, text: &str) {
        self.transcript.push(text);
        self.transcript_scroll = usize::MAX;
    }

    pub fn begin_input(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.input.clear();
        self.waiting = true;
        self.transcript_scroll = usize::MAX;
    }

    fn end_input(&mut self) {
        self.prompt.clear();
        self.input.clear();
        self.waiting = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') | KeyCode::Char('d') = key.code {
                self.end_input();
                self.status_message = "Input closed".to_string();
                return KeyOutcome::Close;
            }
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Enter if self.waiting => {
                let line = std::mem::take(&mut self.input);
                let echoed = format!("{}{}", self.prompt, line);
                self.show(&echoed);
                self.end_input();
                return KeyOutcome::Submit(line);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                self.input.clear();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(PAGE_SIZE);
            }
            KeyCode::PageDown => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(PAGE_SIZE);
            }
            KeyCode::Char(c) if self.waiting => {
                self.input.push(c);
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn scroll_up(&mut self, n: usize) {
        match self.focused_pane {
            FocusedPane::Records => self.records_scroll = self.records_scroll.saturating_sub(n),
            FocusedPane::Transcript => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(n)
            }
        }
    }

    fn scroll_down(&mut self, n: usize) {
        match self.focused_pane {
            FocusedPane::Records => self.records_scroll = self.records_scroll.saturating_add(n),
            FocusedPane::Transcript => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(n)
            }
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input line, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        // Records (left) | Session transcript (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        panes::render_records_pane(
            frame,
            columns[0],
            &self.rows,
            self.capacity,
            self.focused_pane == FocusedPane::Records,
            &mut self.records_scroll,
        );

        panes::render_transcript_pane(
            frame,
            columns[1],
            &self.transcript,
            self.focused_pane == FocusedPane::Transcript,
            &mut self.transcript_scroll,
        );

        panes::render_input_pane(
            frame,
            main_chunks[1],
            &self.prompt,
            &self.input,
            self.waiting,
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.rows.len(),
            self.capacity,
            &self.file_label,
            self.waiting,
        );
    }
}

/// Full-screen prompter
pub struct App<B: Backend> {
    terminal: Terminal<B>,
    screen: Screen,
}

impl<B: Backend> App<B> {
    pub fn new(terminal: Terminal<B>, path: impl AsRef<Path>) -> Self {
        App {
            terminal,
            screen: Screen::new(path.as_ref().display().to_string()),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Give the terminal back for restoring
    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }

    /// Pull in buffered log records, then draw a frame
    pub fn draw(&mut self) -> io::Result<()> {
        for line in logging::drain_captured() {
            self.screen.show(&line);
        }
        self.render_frame()
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let screen = &mut self.screen;
        self.terminal.draw(|f| screen.render(f))?;
        Ok(())
    }
}

impl<B: Backend> Prompter for App<B> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.screen.begin_input(prompt);

        loop {
            self.draw()?;

            // Poll with a timeout so log records show up while idle
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.screen.handle_key(key) {
                    KeyOutcome::Continue => {}
                    KeyOutcome::Submit(line) => return Ok(Some(line)),
                    KeyOutcome::Close => {
                        self.draw()?;
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn say(&mut self, line: &str) {
        self.screen.show(line);
    }

    fn refresh(&mut self, store: &RecordStore) {
        self.screen.sync(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::student::Student;
    use ratatui::backend::TestBackend;

    fn press(screen: &mut Screen, code: KeyCode) -> KeyOutcome {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut Screen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut screen = Screen::new("students.csv");
        screen.begin_input("Enter choice: ");
        type_text(&mut screen, "13");
        press(&mut screen, KeyCode::Backspace);
        assert_eq!(screen.input, "1");

        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            KeyOutcome::Submit("1".to_string())
        );
        assert_eq!(screen.transcript.last(), Some("Enter choice: 1"));
        assert!(!screen.waiting);
        assert!(screen.input.is_empty());

        // Keys are ignored between prompts
        type_text(&mut screen, "x");
        assert_eq!(press(&mut screen, KeyCode::Enter), KeyOutcome::Continue);
        assert!(screen.input.is_empty());
    }

    #[test]
    fn test_ctrl_c_and_ctrl_d_close_input() {
        let mut screen = Screen::new("f");
        screen.begin_input("> ");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_c), KeyOutcome::Close);
        assert!(!screen.waiting);

        screen.begin_input("> ");
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_d), KeyOutcome::Close);
    }

    #[test]
    fn test_focus_and_scrolling() {
        let mut screen = Screen::new("f");
        assert_eq!(screen.focused_pane, FocusedPane::Records);

        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.records_scroll, 1);

        screen.transcript_scroll = 20;
        press(&mut screen, KeyCode::PageUp);
        assert_eq!(screen.transcript_scroll, 10);

        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focused_pane, FocusedPane::Transcript);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.transcript_scroll, 9);
        assert_eq!(screen.records_scroll, 1);
    }

    #[test]
    fn test_draw_shows_store_and_output() {
        let mut store = RecordStore::new();
        store
            .create(Student::new("123", "Alice", 20, "CS").unwrap())
            .unwrap();

        let terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        let mut app = App::new(terminal, "students.csv");
        app.refresh(&store);
        app.say("Student added successfully!");
        app.render_frame().unwrap();

        let text: String = app
            .into_terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Alice"));
        assert!(text.contains("Student added successfully!"));
        assert!(text.contains("students.csv"));
    }
}
