// src/model.rs

use chrono::{DateTime, Utc};
use git2::Oid;
use regex::Regex;

/// Git's well-known id for the tree with no entries
pub const EMPTY_TREE_ID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// A commit as seen by the timeline walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: Oid,
    pub author: String,
    pub time: DateTime<Utc>,
    pub summary: String,
}

/// A snapshot to diff against: either a real tree or the synthetic empty one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Empty,
    Tree(Oid),
}

impl TreeState {
    pub fn from_oid(oid: Oid) -> Self {
        if oid.to_string() == EMPTY_TREE_ID {
            TreeState::Empty
        } else {
            TreeState::Tree(oid)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TreeState::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Renamed,
    Modified,
}

/// One file's delta between two tree states. Blob contents are loaded on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub old_blob: Option<Oid>,
    pub new_blob: Option<Oid>,
}

impl ChangedFile {
    pub fn added(path: impl Into<String>, blob: Option<Oid>) -> Self {
        Self { old_path: None, new_path: Some(path.into()), old_blob: None, new_blob: blob }
    }

    pub fn deleted(path: impl Into<String>, blob: Option<Oid>) -> Self {
        Self { old_path: Some(path.into()), new_path: None, old_blob: blob, new_blob: None }
    }

    pub fn kind(&self) -> ChangeKind {
        match (&self.old_path, &self.new_path) {
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Deleted,
            (Some(old), Some(new)) if old != new => ChangeKind::Renamed,
            _ => ChangeKind::Modified,
        }
    }

    /// The path the file lives at after this change, or before it for deletions
    pub fn path(&self) -> &str {
        self.new_path
            .as_deref()
            .or(self.old_path.as_deref())
            .unwrap_or_default()
    }
}

/// The time range and filters a timeline is built for.
/// A commit qualifies when `start < time < end`; `start <= end` is not checked.
#[derive(Debug, Clone)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub path_regex: Option<Regex>,
    pub author_regex: Option<Regex>,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
            path_regex: None,
            author_regex: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// `None` for the synthetic baseline entry
    pub commit: Option<CommitInfo>,
    pub changes: Vec<ChangedFile>,
}

impl TimelineEntry {
    pub fn is_baseline(&self) -> bool {
        self.commit.is_none()
    }
}

/// Chronological list of entries; the first one, if any, is the baseline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn baseline(&self) -> Option<&TimelineEntry> {
        self.entries.first().filter(|e| e.is_baseline())
    }

    /// Every entry after the baseline
    pub fn commits(&self) -> &[TimelineEntry] {
        match self.baseline() {
            Some(_) => &self.entries[1..],
            None => &self.entries,
        }
    }

    pub fn ensure_not_empty(self) -> crate::error::Result<Self> {
        if self.is_empty() {
            Err(crate::error::ReplayError::EmptyTimeline)
        } else {
            Ok(self)
        }
    }
}

/// A single instruction for whatever renders the replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    SetCursor(usize),
    InsertLine { index: usize, text: String },
    DeleteLine(usize),
    FileCreated(String),
    FileDeleted(String),
    FileRenamed { from: String, to: String },
}

/// Where a group of operations sits in the timeline, for progress display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePosition {
    /// 1-based index among the non-baseline entries
    pub index: usize,
    pub total: usize,
    pub path: String,
    pub author: Option<String>,
}

/// The operations produced for one changed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdits {
    pub position: TimelinePosition,
    pub operations: Vec<EditOperation>,
}
