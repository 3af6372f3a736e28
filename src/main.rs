// Rollcall: student records manager with per-semester marks

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

use rollcall::config::Config;
use rollcall::logging;
use rollcall::records::RecordStore;
use rollcall::session::{self, ConsolePrompter, Prompter, Session};
use rollcall::storage::{self, LoadReport};
use rollcall::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::init(config.log_level.filter()).map_err(|e| e.to_string())?;

    let (mut store, report) = match storage::load_store(&config.file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let greeting = startup_messages(&store, &report, &config);

    let res: Result<(), Box<dyn std::error::Error>> = if config.plain {
        let stdin = io::stdin();
        let mut prompter = ConsolePrompter::new(stdin.lock(), io::stdout());
        run_session(&mut store, &mut prompter, &config, &greeting).map_err(Into::into)
    } else {
        run_tui(&mut store, &config, &greeting)
    };

    if let Err(err) = res {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// What the load did, shown before the first menu
fn startup_messages(store: &RecordStore, report: &LoadReport, config: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    if report.file_found {
        lines.push(format!(
            "Loaded {} student(s) from {}",
            store.len(),
            config.file.display()
        ));
        if !report.skipped.is_empty() {
            lines.push(format!(
                "Warning: skipped {} malformed line(s).",
                report.skipped.len()
            ));
        }
        if report.truncated {
            lines.push(format!(
                "Warning: database full, only the first {} student(s) were loaded.",
                store.capacity()
            ));
        }
    } else {
        lines.push("No existing database file found. Starting fresh.".to_string());
    }
    lines
}

fn run_session<P: Prompter>(
    store: &mut RecordStore,
    prompter: &mut P,
    config: &Config,
    greeting: &[String],
) -> session::Result<()> {
    for line in greeting {
        prompter.say(line);
    }
    let mut session = Session::new(store, prompter, &config.file).with_autosave(config.autosave());
    session.run()?;
    if session.is_dirty() {
        warn!("Exiting with unsaved changes");
    }
    Ok(())
}

fn run_tui(
    store: &mut RecordStore,
    config: &Config,
    greeting: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    logging::start_capture();

    // Create and run app
    let mut app = App::new(terminal, &config.file);
    let res = run_session(store, &mut app, config, greeting);

    // Restore terminal
    let mut terminal = app.into_terminal();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    for line in logging::stop_capture() {
        eprintln!("{}", line);
    }

    res?;
    Ok(())
}
