use std::env as stdenv;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "GAG> ";
pub const DEFAULT_HISTORY_FILE: &str = ".gaghistory";
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Console settings, fixed for the lifetime of a session.
///
/// Fields are public so the binary can fill them from command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prompt printed before every line.
    pub prompt: String,
    /// File the input history is loaded from and written to.
    pub history_file: PathBuf,
    /// Maximum number of history lines kept, in memory and on disk.
    pub history_size: usize,
    /// Whether to print the welcome banner at startup.
    pub greeting: bool,
}

impl Settings {
    /// Defaults, with the history file placed in the current working directory.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_file: current_dir.join(DEFAULT_HISTORY_FILE),
            history_size: DEFAULT_HISTORY_SIZE,
            greeting: true,
        }
    }

    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = path.into();
        self
    }

    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    pub fn with_greeting(mut self, greeting: bool) -> Self {
        self.greeting = greeting;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
