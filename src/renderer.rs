// src/renderer.rs

use crate::cli::Mode;
use git_replay::model::{EditOperation, FileEdits};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Writes replayed edits to a terminal-like sink, pacing them in `Play` mode
pub struct Renderer<W: Write> {
    out: W,
    mode: Mode,
    /// Delay per typed character; `None` renders as fast as possible
    char_delay: Option<Duration>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: Mode, playback_speed: u32) -> Self {
        let char_delay = (playback_speed > 0 && matches!(mode, Mode::Play))
            .then(|| Duration::from_nanos(1_000_000_000 / u64::from(playback_speed)));
        Self { out, mode, char_delay }
    }

    pub fn render(&mut self, edits: &FileEdits) -> io::Result<()> {
        let pos = &edits.position;
        writeln!(
            self.out,
            "[{}/{}] {} ({})",
            pos.index,
            pos.total,
            pos.path,
            pos.author.as_deref().unwrap_or("unknown")
        )?;
        for op in &edits.operations {
            match self.mode {
                Mode::Log => self.log(op)?,
                Mode::Play => self.play(op)?,
            }
        }
        self.out.flush()
    }

    fn log(&mut self, op: &EditOperation) -> io::Result<()> {
        match op {
            EditOperation::SetCursor(line) => writeln!(self.out, "@ {line}"),
            EditOperation::InsertLine { index, text } => {
                writeln!(self.out, "+ {index} {}", text.trim_end_matches(['\r', '\n']))
            }
            EditOperation::DeleteLine(index) => writeln!(self.out, "- {index}"),
            EditOperation::FileCreated(path) => writeln!(self.out, "created {path}"),
            EditOperation::FileDeleted(path) => writeln!(self.out, "deleted {path}"),
            EditOperation::FileRenamed { from, to } => writeln!(self.out, "renamed {from} -> {to}"),
        }
    }

    fn play(&mut self, op: &EditOperation) -> io::Result<()> {
        match op {
            EditOperation::InsertLine { index, text } => {
                write!(self.out, "{:>5} | ", index + 1)?;
                for ch in text.trim_end_matches(['\r', '\n']).chars() {
                    write!(self.out, "{ch}")?;
                    self.pause()?;
                }
                writeln!(self.out)
            }
            EditOperation::DeleteLine(index) => {
                writeln!(self.out, "{:>5} x", index + 1)?;
                self.pause()
            }
            EditOperation::SetCursor(_) => self.pause(),
            other => self.log(other),
        }
    }

    fn pause(&mut self) -> io::Result<()> {
        if let Some(delay) = self.char_delay {
            self.out.flush()?;
            thread::sleep(delay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git_replay::model::TimelinePosition;

    #[test]
    fn log_mode_prints_one_line_per_operation() {
        let edits = FileEdits {
            position: TimelinePosition { index: 1, total: 2, path: "a.txt".into(), author: Some("Ada".into()) },
            operations: vec![
                EditOperation::FileCreated("a.txt".into()),
                EditOperation::SetCursor(0),
                EditOperation::InsertLine { index: 0, text: "hello\n".into() },
                EditOperation::DeleteLine(1),
            ],
        };
        let mut out = Vec::new();
        Renderer::new(&mut out, Mode::Log, 1000).render(&edits).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[1/2] a.txt (Ada)\ncreated a.txt\n@ 0\n+ 0 hello\n- 1\n"
        );
    }

    #[test]
    fn play_mode_without_speed_does_not_pace() {
        let renderer = Renderer::new(Vec::new(), Mode::Play, 0);
        assert!(renderer.char_delay.is_none());
        let renderer = Renderer::new(Vec::new(), Mode::Play, 100);
        assert_eq!(renderer.char_delay, Some(Duration::from_millis(10)));
    }
}
