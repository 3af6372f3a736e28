//! Command-line configuration

use crate::records::constants::DEFAULT_DATABASE_FILE;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Student records manager with per-semester marks
#[derive(Debug, Clone, Parser)]
#[command(name = "rollcall", version, about)]
pub struct Config {
    /// Database file to load from and save to
    #[arg(short, long, default_value = DEFAULT_DATABASE_FILE)]
    pub file: PathBuf,

    /// Use line-by-line prompts instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Do not save after every menu action
    #[arg(long)]
    pub no_autosave: bool,

    /// Diagnostics shown for load and save problems
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn autosave(&self) -> bool {
        !self.no_autosave
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
