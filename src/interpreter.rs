use crate::command::{CommandRegistry, DispatchError, Invocation, Reply};
use crate::controller::Controller;
use crate::fault::{self, Outcome};
use crate::history::History;
use crate::io_adapters::{LineReader, ReadOutcome};
use crate::pipeline::{self, StageOutcome};
use crate::settings::Settings;
use crate::tokenizer::{self, CommandSegment, Parsed};
use log::{debug, error, warn};
use std::io::{self, Write};

/// Whether the console keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The GAG console: reads lines, records them, and dispatches them as single
/// commands or pipelines against a fixed command registry.
///
/// Example
/// ```
/// use gag_console::{DetachedController, Settings, Shell, gag_commands};
/// let dir = tempfile::tempdir().unwrap();
/// let settings = Settings::new().with_history_file(dir.path().join(".gaghistory"));
/// let mut shell = Shell::new(settings, gag_commands(), Box::new(DetachedController));
/// let mut out = Vec::new();
/// shell.execute_line("help exit", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Exit this console.\n");
/// ```
pub struct Shell {
    settings: Settings,
    registry: CommandRegistry,
    controller: Box<dyn Controller>,
    history: History,
}

impl Shell {
    /// Create a console, loading history from the configured file.
    pub fn new(settings: Settings, registry: CommandRegistry, controller: Box<dyn Controller>) -> Self {
        let history = History::load(&settings.history_file, settings.history_size);
        Self {
            settings,
            registry,
            controller,
            history,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read-eval-print loop. Returns when `exit` runs or input ends.
    ///
    /// Only failures to write to `out` are returned; command faults are
    /// reported on `out` and the loop goes on.
    pub fn run(&mut self, reader: &mut dyn LineReader, out: &mut dyn Write) -> io::Result<()> {
        loop {
            let line = match reader.read_line(&self.settings.prompt) {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) => {
                    writeln!(out, "Interrupted")?;
                    break;
                }
                Ok(ReadOutcome::Eof) => {
                    writeln!(out)?;
                    break;
                }
                Err(err) => {
                    error!("failed to read input: {err:#}");
                    break;
                }
            };

            if !line.trim().is_empty() {
                self.history.append(&line);
                reader.remember(&line);
            }

            if self.execute_line(&line, out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Parse and dispatch one line, writing its output and any diagnostics.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        match tokenizer::tokenize(line) {
            Parsed::Empty => Ok(Flow::Continue),
            Parsed::Single(segment) => {
                let outcome = self.dispatch(&segment, line, "", out)?;
                match outcome {
                    StageOutcome::Emitted(text) => {
                        if !text.is_empty() {
                            writeln!(out, "{text}")?;
                        }
                        Ok(Flow::Continue)
                    }
                    StageOutcome::Nothing => Ok(Flow::Continue),
                    StageOutcome::Exit => Ok(Flow::Exit),
                }
            }
            Parsed::Pipeline(segments) => {
                let run = pipeline::run(&segments, |text, context| {
                    self.dispatch_segment(text, context.input(), out)
                })?;
                if let Some(text) = run.output {
                    writeln!(out, "{text}")?;
                }
                Ok(if run.exit { Flow::Exit } else { Flow::Continue })
            }
        }
    }

    /// Re-tokenize one pipeline segment and dispatch it.
    fn dispatch_segment(
        &mut self,
        text: &str,
        input: &str,
        out: &mut dyn Write,
    ) -> io::Result<StageOutcome> {
        match tokenizer::tokenize(text) {
            Parsed::Empty => Ok(StageOutcome::Nothing),
            Parsed::Single(segment) => self.dispatch(&segment, text, input, out),
            Parsed::Pipeline(_) => {
                // Segments never contain an unquoted pipe.
                warn!("ignoring nested pipeline segment `{text}`");
                Ok(StageOutcome::Nothing)
            }
        }
    }

    /// Look up and run one command through fault containment.
    fn dispatch(
        &mut self,
        segment: &CommandSegment,
        text: &str,
        input: &str,
        out: &mut dyn Write,
    ) -> io::Result<StageOutcome> {
        let Some(descriptor) = self.registry.lookup(&segment.name) else {
            debug!("unknown command `{}`", segment.name);
            writeln!(out, "{}", DispatchError::UnknownCommand(text.trim().to_string()))?;
            return Ok(StageOutcome::Nothing);
        };

        self.controller.set_input(input);
        let invocation = Invocation {
            controller: self.controller.as_mut(),
            registry: &self.registry,
            args: descriptor.shape().apply(&segment.args),
            input,
        };

        match fault::guard(|| descriptor.execute(invocation)) {
            Outcome::Success(Reply::Output(text)) => Ok(StageOutcome::Emitted(text)),
            Outcome::Success(Reply::Silent) => Ok(StageOutcome::Nothing),
            Outcome::Success(Reply::Exit) => Ok(StageOutcome::Exit),
            Outcome::Failure(diagnostic) => {
                debug!("command `{}` failed: {}", segment.name, diagnostic.summary);
                writeln!(out, "{diagnostic}")?;
                Ok(StageOutcome::Nothing)
            }
        }
    }
}
