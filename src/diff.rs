// src/diff.rs

use crate::error::Result;
use crate::model::{ChangedFile, TreeState};
use git2::{Delta, DiffDelta, DiffFindOptions, DiffOptions, Oid, Repository, Tree};

/// Changed files between two tree states, with renames detected.
/// Order is libgit2's delta order, which is stable for the same pair of trees.
pub fn diff(repo: &Repository, old: &TreeState, new: &TreeState) -> Result<Vec<ChangedFile>> {
    let old_tree = resolve(repo, old)?;
    let new_tree = resolve(repo, new)?;

    let mut diff_opts = DiffOptions::new();
    diff_opts.ignore_filemode(true);
    let mut diff = repo.diff_tree_to_tree(old_tree.as_ref(), new_tree.as_ref(), Some(&mut diff_opts))?;

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))?;

    Ok(diff.deltas().filter_map(|delta| classify(&delta)).collect())
}

/// `None` stands for the empty tree, which libgit2 diffs without an object lookup
fn resolve<'r>(repo: &'r Repository, state: &TreeState) -> Result<Option<Tree<'r>>> {
    match state {
        TreeState::Empty => Ok(None),
        TreeState::Tree(oid) => Ok(Some(repo.find_tree(*oid)?)),
    }
}

fn classify(delta: &DiffDelta<'_>) -> Option<ChangedFile> {
    let old_path = delta.old_file().path().map(|p| p.to_str());
    let new_path = delta.new_file().path().map(|p| p.to_str());
    if matches!(old_path, Some(None)) || matches!(new_path, Some(None)) {
        tracing::warn!(status = ?delta.status(), "skipping change with a non UTF-8 path");
        return None;
    }
    let old_path = old_path.flatten().map(String::from);
    let new_path = new_path.flatten().map(String::from);
    let old_blob = blob_id(delta.old_file().id());
    let new_blob = blob_id(delta.new_file().id());

    let change = match delta.status() {
        Delta::Added | Delta::Copied => ChangedFile { old_path: None, new_path, old_blob: None, new_blob },
        Delta::Deleted => ChangedFile { old_path, new_path: None, old_blob, new_blob: None },
        Delta::Renamed | Delta::Modified | Delta::Typechange => ChangedFile { old_path, new_path, old_blob, new_blob },
        status => {
            tracing::debug!(?status, "ignoring delta");
            return None;
        }
    };
    if change.old_path.is_none() && change.new_path.is_none() {
        return None;
    }
    Some(change)
}

fn blob_id(id: Oid) -> Option<Oid> {
    (!id.is_zero()).then_some(id)
}
