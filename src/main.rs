// src/main.rs

mod cli;
mod logging;
mod renderer;

use clap::Parser;
use cli::Args;
use git2::Repository;
use git_replay::{replay, timeline, ReplayError};
use indicatif::ProgressBar;
use renderer::Renderer;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_notice() => {
            eprintln!("{e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error replaying repository: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ReplayError> {
    let repo = Repository::open(&args.repo).map_err(|source| ReplayError::InvalidRepository {
        path: args.repo.clone(),
        source,
    })?;
    let window = args.window();

    let start_time = Instant::now();
    let commits = timeline::chronological_commits(&repo)?;
    let bar = ProgressBar::new(commits.len() as u64);
    bar.set_message("Building timeline");
    let timeline = timeline::build_from(&repo, &commits, &window, &bar)?;
    bar.finish_and_clear();
    let timeline = timeline.ensure_not_empty()?;
    tracing::info!(
        entries = timeline.len(),
        elapsed = ?start_time.elapsed(),
        "timeline ready"
    );

    let mut renderer = Renderer::new(std::io::stdout().lock(), args.mode, args.playback_speed);
    loop {
        for edits in replay::replay(&repo, &timeline) {
            if let Err(e) = renderer.render(&edits) {
                // A closed stdout (e.g. piped into `head`) ends playback quietly.
                tracing::debug!(%e, "output closed");
                return Ok(());
            }
        }
        if !args.repeat {
            break;
        }
    }
    Ok(())
}
