// src/blob.rs

use git2::{Oid, Repository};

/// Outcome of turning blob bytes into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Text(Vec<String>),
    /// No blob on this side of the change
    Absent,
    /// Binary or not valid UTF-8
    Undecodable,
}

impl Decoded {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Decoded::Text(lines) => lines,
            Decoded::Absent | Decoded::Undecodable => Vec::new(),
        }
    }
}

/// Splits content into lines, each keeping its `\n` except possibly the last.
pub fn decode(content: Option<&[u8]>) -> Decoded {
    let Some(bytes) = content else {
        return Decoded::Absent;
    };
    // Same heuristic git uses to call a blob binary.
    if bytes.contains(&0) {
        return Decoded::Undecodable;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Decoded::Text(text.split_inclusive('\n').map(String::from).collect()),
        Err(_) => Decoded::Undecodable,
    }
}

pub fn decode_blob(repo: &Repository, id: Option<Oid>) -> Decoded {
    let Some(id) = id.filter(|id| !id.is_zero()) else {
        return Decoded::Absent;
    };
    match repo.find_blob(id) {
        Ok(blob) => decode(Some(blob.content())),
        Err(err) => {
            tracing::debug!(%id, %err, "blob lookup failed");
            Decoded::Absent
        }
    }
}

/// Lines of a blob, empty when it is missing or binary
pub fn blob_lines(repo: &Repository, id: Option<Oid>) -> Vec<String> {
    decode_blob(repo, id).into_lines()
}
