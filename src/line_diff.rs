// src/line_diff.rs

use git2::{DiffOptions, Patch};

/// One line of a zero-context unified diff, without the `---`/`+++` preamble
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `@@ -a,b +c,d @@`, trailing newline removed
    HunkHeader(String),
    Insertion(String),
    Deletion(String),
}

/// Minimal line edit script from `old` to `new`.
///
/// Lines are joined back into buffers and diffed by libgit2, so line boundaries are
/// the `\n` boundaries `blob::decode` produces.
pub fn compute(old: &[String], new: &[String]) -> Vec<DiffLine> {
    match try_compute(old, new) {
        Ok(lines) => lines,
        Err(err) => {
            tracing::warn!(%err, "line diff failed");
            Vec::new()
        }
    }
}

fn try_compute(old: &[String], new: &[String]) -> Result<Vec<DiffLine>, git2::Error> {
    let old_buf = old.concat();
    let new_buf = new.concat();

    let mut opts = DiffOptions::new();
    opts.context_lines(0).interhunk_lines(0).force_text(true);
    let patch = Patch::from_buffers(old_buf.as_bytes(), None, new_buf.as_bytes(), None, Some(&mut opts))?;

    let mut script = Vec::new();
    for hunk_idx in 0..patch.num_hunks() {
        let (hunk, line_count) = patch.hunk(hunk_idx)?;
        let header = String::from_utf8_lossy(hunk.header());
        script.push(DiffLine::HunkHeader(header.trim_end().to_string()));

        for line_idx in 0..line_count {
            let line = patch.line_in_hunk(hunk_idx, line_idx)?;
            let text = String::from_utf8_lossy(line.content()).into_owned();
            match line.origin() {
                '+' => script.push(DiffLine::Insertion(text)),
                '-' => script.push(DiffLine::Deletion(text)),
                // context and end-of-file newline markers
                _ => {}
            }
        }
    }
    Ok(script)
}
