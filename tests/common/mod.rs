//! Throwaway repositories with fully controlled authors and commit times.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, Oid, Repository, Signature, Time};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        Self { dir, repo }
    }

    /// Writes a file into the working tree and stages it.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) -> &Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
        self
    }

    pub fn remove(&self, path: &str) -> &Self {
        std::fs::remove_file(self.dir.path().join(path)).unwrap();
        let mut index = self.repo.index().unwrap();
        index.remove_path(Path::new(path)).unwrap();
        index.write().unwrap();
        self
    }

    pub fn rename(&self, from: &str, to: &str) -> &Self {
        let content = std::fs::read(self.dir.path().join(from)).unwrap();
        self.remove(from);
        self.write(to, content)
    }

    /// Commits whatever is staged, authored and committed at `seconds`.
    pub fn commit(&self, author: &str, seconds: i64) -> Oid {
        let mut index = self.repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::new(author, "author@example.com", &Time::new(seconds, 0)).unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, &format!("commit at {seconds}"), &tree, &parents)
            .unwrap()
    }

    pub fn blob_at(&self, commit: Oid, path: &str) -> Oid {
        let tree = self.repo.find_commit(commit).unwrap().tree().unwrap();
        tree.get_path(Path::new(path)).unwrap().id()
    }

    /// Every file in HEAD's tree as lines, the way the replay mirrors them.
    pub fn head_files(&self) -> BTreeMap<String, Vec<String>> {
        let tree = self.repo.head().unwrap().peel_to_tree().unwrap();
        let mut files = BTreeMap::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(git2::ObjectType::Blob) {
                let path = format!("{dir}{}", entry.name().unwrap());
                files.insert(path, git_replay::blob::blob_lines(&self.repo, Some(entry.id())));
            }
            git2::TreeWalkResult::Ok
        })
        .unwrap();
        files
    }
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
