// src/replay.rs

use crate::blob::blob_lines;
use crate::error::{ReplayError, Result};
use crate::hunk;
use crate::line_diff::{self, DiffLine};
use crate::model::*;
use git2::Repository;
use std::collections::BTreeMap;

/// Replays a timeline one entry at a time, mirroring every file's lines so the
/// emitted line indices stay valid as edits accumulate.
pub struct ReplaySession<'r> {
    repo: &'r Repository,
    files: BTreeMap<String, Vec<String>>,
    index: usize,
    total: usize,
}

impl<'r> ReplaySession<'r> {
    /// Starts from the contents described by the timeline's baseline entry.
    pub fn new(repo: &'r Repository, timeline: &Timeline) -> Self {
        let files = timeline
            .baseline()
            .map(|entry| {
                entry
                    .changes
                    .iter()
                    .filter_map(|c| Some((c.new_path.clone()?, blob_lines(repo, c.new_blob))))
                    .collect()
            })
            .unwrap_or_default();

        Self { repo, files, index: 0, total: timeline.commits().len() }
    }

    pub fn files(&self) -> &BTreeMap<String, Vec<String>> {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&[String]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Produces the operations for one non-baseline entry, one group per changed file.
    /// A file whose edits cannot be applied is cut short; the others still run.
    pub fn step(&mut self, entry: &TimelineEntry) -> Vec<FileEdits> {
        self.index += 1;
        let author = entry.commit.as_ref().map(|c| c.author.clone());

        entry
            .changes
            .iter()
            .map(|change| {
                let mut operations = Vec::new();
                if let Err(err) = self.apply(change, &mut operations) {
                    tracing::warn!(path = change.path(), %err, "skipping rest of file");
                }
                FileEdits {
                    position: TimelinePosition {
                        index: self.index,
                        total: self.total,
                        path: change.path().to_string(),
                        author: author.clone(),
                    },
                    operations,
                }
            })
            .collect()
    }

    fn apply(&mut self, change: &ChangedFile, ops: &mut Vec<EditOperation>) -> Result<()> {
        let path = change.path().to_string();
        let old_lines = blob_lines(self.repo, change.old_blob);
        let new_lines = blob_lines(self.repo, change.new_blob);

        match change.kind() {
            ChangeKind::Renamed => {
                let from = change.old_path.clone().unwrap_or_default();
                let state = self.files.remove(&from).unwrap_or_else(|| old_lines.clone());
                self.files.insert(path.clone(), state);
                ops.push(EditOperation::FileRenamed { from, to: path.clone() });
            }
            ChangeKind::Added => {
                self.files.insert(path.clone(), Vec::new());
                ops.push(EditOperation::FileCreated(path.clone()));
            }
            ChangeKind::Modified | ChangeKind::Deleted => {}
        }

        // Files that were never in view (created while filtered out) start from their old content.
        let file = self.files.entry(path.clone()).or_insert_with(|| {
            tracing::debug!(path = %path, "no mirrored state, seeding from old blob");
            old_lines.clone()
        });

        // Commits skipped by the author filter leave the mirror behind the change's old side;
        // diffing from the mirror folds their edits into this script.
        if *file != old_lines {
            tracing::debug!(path = %path, "mirror differs from old blob, diffing from mirror");
        }
        let script = line_diff::compute(file.as_slice(), &new_lines);

        let mut cursor = 0;
        for line in script {
            match line {
                DiffLine::HunkHeader(header) => {
                    cursor = hunk::parse(&header)?;
                    ops.push(EditOperation::SetCursor(cursor));
                }
                DiffLine::Insertion(text) => {
                    if cursor > file.len() {
                        return Err(ReplayError::LineOutOfRange { path, index: cursor });
                    }
                    file.insert(cursor, text.clone());
                    ops.push(EditOperation::InsertLine { index: cursor, text });
                    cursor += 1;
                }
                DiffLine::Deletion(_) => {
                    if cursor >= file.len() {
                        return Err(ReplayError::LineOutOfRange { path, index: cursor });
                    }
                    file.remove(cursor);
                    ops.push(EditOperation::DeleteLine(cursor));
                }
            }
        }

        if change.kind() == ChangeKind::Deleted {
            self.files.remove(&path);
            ops.push(EditOperation::FileDeleted(path));
        }
        Ok(())
    }
}

/// Every file's operations for the whole timeline, in order
pub fn replay<'a>(repo: &'a Repository, timeline: &'a Timeline) -> impl Iterator<Item = FileEdits> + 'a {
    let mut session = ReplaySession::new(repo, timeline);
    timeline.commits().iter().flat_map(move |entry| session.step(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn modified(repo: &Repository, path: &str, old: &str, new: &str) -> ChangedFile {
        ChangedFile {
            old_path: Some(path.into()),
            new_path: Some(path.into()),
            old_blob: Some(repo.blob(old.as_bytes()).unwrap()),
            new_blob: Some(repo.blob(new.as_bytes()).unwrap()),
        }
    }

    #[test]
    fn stale_mirror_is_brought_to_the_new_content() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let mut session = ReplaySession::new(&repo, &Timeline::default());
        session.files.insert("stale.txt".into(), vec!["1\n".into()]);

        let entry = TimelineEntry {
            commit: None,
            changes: vec![
                modified(&repo, "stale.txt", "1\n2\n", "1\n2\n3\n"),
                modified(&repo, "fresh.txt", "x\n", "x\ny\n"),
            ],
        };
        let edits = session.step(&entry);

        assert_eq!(edits.len(), 2);
        assert_eq!(
            edits[0].operations,
            vec![
                EditOperation::SetCursor(1),
                EditOperation::InsertLine { index: 1, text: "2\n".into() },
                EditOperation::InsertLine { index: 2, text: "3\n".into() },
            ]
        );
        assert_eq!(session.file("stale.txt").unwrap(), ["1\n", "2\n", "3\n"]);
        assert_eq!(
            edits[1].operations,
            vec![
                EditOperation::SetCursor(1),
                EditOperation::InsertLine { index: 1, text: "y\n".into() },
            ]
        );
        assert_eq!(session.file("fresh.txt").unwrap(), ["x\n", "y\n"]);
        assert_eq!(edits[1].position.index, 1);
        assert_eq!(edits[1].position.author, None);
    }
}
