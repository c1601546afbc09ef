// src/timeline.rs

use crate::diff;
use crate::error::Result;
use crate::filter::{author_matches, path_matches};
use crate::model::*;
use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, ErrorCode, Oid, Repository};
use indicatif::ProgressBar;

/// Receives a tick for every commit the timeline walk visits
pub trait Progress {
    fn advance(&self, n: u64);
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&self, _n: u64) {}
}

impl Progress for ProgressBar {
    fn advance(&self, n: u64) {
        self.inc(n);
    }
}

/// Every commit reachable from HEAD, oldest first, parents always before their children
/// even when committer clocks disagree. An unborn HEAD has no history.
pub fn chronological_commits(repo: &Repository) -> Result<Vec<Oid>> {
    let mut revwalk = repo.revwalk()?;
    match revwalk.push_head() {
        Ok(()) => {}
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    }
    revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

    let mut commits = revwalk.collect::<std::result::Result<Vec<_>, _>>()?;
    commits.reverse(); // Walk from the first commit to the last
    Ok(commits)
}

/// Builds the replay timeline for `window`.
///
/// Commits that fall before the window, or whose author or paths are filtered out, still
/// advance the tree the next diff is taken against, so their changes show up in the
/// baseline or in the next included entry instead of being lost.
pub fn build(repo: &Repository, window: &Window, progress: &dyn Progress) -> Result<Timeline> {
    build_from(repo, &chronological_commits(repo)?, window, progress)
}

/// Like [`build`], over commits already listed by [`chronological_commits`].
pub fn build_from(repo: &Repository, commits: &[Oid], window: &Window, progress: &dyn Progress) -> Result<Timeline> {
    tracing::debug!(commits = commits.len(), "walking history");

    let mut timeline = Timeline::default();
    let mut previous_tree = TreeState::Empty;

    for &oid in commits {
        let commit = repo.find_commit(oid)?;
        let commit_tree = TreeState::from_oid(commit.tree_id());
        let commit_time = commit_datetime(&commit);
        progress.advance(1);

        if commit_time >= window.end {
            break;
        }
        if window.start >= commit_time {
            previous_tree = commit_tree;
            continue;
        }

        let info = commit_info(&commit, commit_time);
        if !author_matches(&info.author, window.author_regex.as_ref()) {
            tracing::trace!(commit = %oid, author = %info.author, "author filtered out");
            previous_tree = commit_tree;
            continue;
        }

        let changes: Vec<ChangedFile> = diff::diff(repo, &previous_tree, &commit_tree)?
            .into_iter()
            .filter(|c| path_matches(c, window.path_regex.as_ref()))
            .collect();
        if changes.is_empty() {
            previous_tree = commit_tree;
            continue;
        }

        if timeline.is_empty() {
            // The starting state ignores the filters: it is where files begin, not an event.
            let initial = diff::diff(repo, &TreeState::Empty, &previous_tree)?;
            timeline.entries.push(TimelineEntry { commit: None, changes: initial });
        }
        tracing::debug!(commit = %oid, summary = %info.summary, files = changes.len(), "timeline entry");
        timeline.entries.push(TimelineEntry { commit: Some(info), changes });
        previous_tree = commit_tree;
    }

    Ok(timeline)
}

fn commit_datetime(commit: &Commit) -> DateTime<Utc> {
    Utc.timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn commit_info(commit: &Commit, time: DateTime<Utc>) -> CommitInfo {
    CommitInfo {
        id: commit.id(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        time,
        summary: commit.summary().unwrap_or_default().to_string(),
    }
}
