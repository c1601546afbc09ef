// src/hunk.rs

use crate::error::{ReplayError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static HUNK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header pattern is valid")
});

/// The line ranges named by a `@@ -a,b +c,d @@` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRanges {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
}

impl HunkRanges {
    /// Zero-based index where the hunk's first change applies in the partially edited file.
    /// A zero-count side already names the line *before* the change, so it needs no offset.
    pub fn cursor(&self) -> usize {
        if self.new_count != 0 {
            self.new_start.saturating_sub(1)
        } else {
            self.new_start
        }
    }
}

pub fn parse_ranges(header: &str) -> Result<HunkRanges> {
    let malformed = || ReplayError::HunkParse { header: header.trim_end().to_string() };
    let caps = HUNK_HEADER.captures(header).ok_or_else(malformed)?;
    // Omitted counts mean a single line.
    let number = |i: usize, default: Option<usize>| -> Result<usize> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().map_err(|_| malformed()),
            None => default.ok_or_else(malformed),
        }
    };
    Ok(HunkRanges {
        old_start: number(1, None)?,
        old_count: number(2, Some(1))?,
        new_start: number(3, None)?,
        new_count: number(4, Some(1))?,
    })
}

pub fn parse(header: &str) -> Result<usize> {
    parse_ranges(header).map(|r| r.cursor())
}
