//! Sources of console input.

use crate::history::History;
use anyhow::Result;
use log::debug;
use rustyline::{Config, DefaultEditor};
use rustyline::error::ReadlineError;
use std::collections::VecDeque;

/// Result of asking for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The operator pressed Ctrl-C.
    Interrupted,
    /// Input is exhausted (Ctrl-D, or the end of a script).
    Eof,
}

/// Anything the console loop can read lines from.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Called with every line the console accepted, for in-session recall.
    fn remember(&mut self, _line: &str) {}
}

/// Interactive reader backed by a rustyline editor.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    /// Create an editor whose arrow-key recall starts with `history` and is
    /// bounded like it.
    pub fn new(history: &History) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(history.max_len())?
            .build();
        let mut editor = DefaultEditor::with_config(config)?;
        for entry in history.iter() {
            editor.add_history_entry(entry)?;
        }
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            debug!("editor refused history entry: {err}");
        }
    }
}

/// Reader that replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not read yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        Ok(match self.lines.pop_front() {
            Some(line) => ReadOutcome::Line(line),
            None => ReadOutcome::Eof,
        })
    }
}
