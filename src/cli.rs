// src/cli.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use git_replay::model::Window;
use regex::Regex;
use std::path::PathBuf;

/// Default playback speed in characters per second
pub const DEFAULT_PLAYBACK_SPEED: u32 = 1000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a git repository's files being typed out over time", long_about = None)]
pub struct Args {
    /// Path to the git repository to replay
    #[arg(short, long)]
    pub repo: PathBuf,

    /// Only replay commits after this time, e.g. "2021-03-01T12:00:00Z" or "01/03/2021 12:00:00"
    #[arg(short, long, value_parser = parse_datetime)]
    pub start: Option<DateTime<Utc>>,

    /// Stop before the first commit at or after this time
    #[arg(short, long, value_parser = parse_datetime)]
    pub end: Option<DateTime<Utc>>,

    /// Only replay files whose path matches this regex, e.g. "src/.*\.rs"
    #[arg(short, long)]
    pub file_regex: Option<Regex>,

    /// Only replay commits whose author name matches this regex
    #[arg(short, long)]
    pub author_regex: Option<Regex>,

    /// Initial playback speed in characters per second (0 disables pacing)
    #[arg(short, long, default_value_t = DEFAULT_PLAYBACK_SPEED)]
    pub playback_speed: u32,

    /// How edits are shown
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    pub mode: Mode,

    /// Start over once the last commit has been replayed
    #[arg(long = "loop")]
    pub repeat: bool,
}

impl Args {
    pub fn window(&self) -> Window {
        let defaults = Window::default();
        Window {
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
            path_regex: self.file_regex.clone(),
            author_regex: self.author_regex.clone(),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Type inserted lines out character by character
    Play,
    /// Print one line per edit operation, unpaced
    Log,
}

/// Accepts RFC 3339 or `DD/MM/YYYY hh:mm:ss` (taken as UTC)
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid datetime: {s}"))
}
