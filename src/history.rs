//! Bounded, file-backed history of console input.

use log::{debug, warn};
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot read history file {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write history file {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Input lines of this and earlier sessions, oldest first.
///
/// The log never holds more than `max_len` entries, and the backing file is
/// rewritten in full after every append.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    max_len: usize,
    entries: VecDeque<String>,
}

impl History {
    /// An empty history that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>, max_len: usize) -> Self {
        Self {
            path: path.into(),
            max_len,
            entries: VecDeque::new(),
        }
    }

    /// Load history from `path`, keeping only the newest `max_len` lines.
    ///
    /// A missing or unreadable file is not fatal: it is logged and an empty
    /// history is returned.
    pub fn load(path: impl Into<PathBuf>, max_len: usize) -> Self {
        let mut history = Self::new(path, max_len);
        match history.reload() {
            Ok(()) => debug!(
                "loaded {} history entries from {}",
                history.len(),
                history.path.display()
            ),
            Err(err) => warn!("No history available: {err}"),
        }
        history
    }

    fn reload(&mut self) -> Result<(), HistoryError> {
        let bytes = fs::read(&self.path).map_err(|source| HistoryError::Load {
            path: self.path.clone(),
            source,
        })?;
        // Undecodable bytes must not cost the rest of the log.
        let content = String::from_utf8_lossy(&bytes);
        self.entries = content.lines().map(str::to_string).collect();
        self.truncate();
        Ok(())
    }

    /// Record a line and persist the log.
    ///
    /// Line breaks inside `line` are folded into spaces so that every entry
    /// occupies exactly one line of the file. Persistence failures are logged;
    /// the in-memory log is updated regardless.
    pub fn append(&mut self, line: &str) {
        self.entries.push_back(single_line(line));
        self.truncate();
        if let Err(err) = self.persist() {
            warn!("{err}: {}", io_source(&err));
        }
    }

    /// Overwrite the backing file with the current log.
    pub fn persist(&self) -> Result<(), HistoryError> {
        self.write_entries().map_err(|source| HistoryError::Persist {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let written = self
            .entries
            .iter()
            .try_for_each(|entry| writeln!(writer, "{entry}"));
        let flushed = writer.flush();
        written.and(flushed)
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.max_len {
            self.entries.pop_front();
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

fn single_line(line: &str) -> String {
    line.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn io_source(err: &HistoryError) -> &io::Error {
    match err {
        HistoryError::Load { source, .. } | HistoryError::Persist { source, .. } => source,
    }
}
