//! Fault containment for command invocations.
//!
//! Every command runs through [`guard`]. Whatever goes wrong inside (an `Err`
//! from the handler or the controller, or a panic) comes back as a
//! [`Diagnostic`] the console prints before prompting again.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Human-readable account of a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// One-line description of the fault.
    pub summary: String,
    /// Cause chain, panic location and backtrace, as far as they are known.
    pub trace: String,
}

impl Diagnostic {
    fn from_error(err: &anyhow::Error) -> Self {
        Self {
            summary: err.to_string(),
            trace: format!("{err:?}"),
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let summary = if let Some(msg) = payload.downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "command panicked".to_string()
        };
        let trace = LAST_PANIC
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_else(|| format!("panicked: {summary}"));
        Self { summary, trace }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sorry, that command raised an exception. Here's what I know:")?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;
        if self.trace != self.summary {
            writeln!(f)?;
            write!(f, "{}", self.trace)?;
        }
        Ok(())
    }
}

/// Tagged result of a guarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    Success(R),
    Failure(Diagnostic),
}

/// Run `thunk`, turning errors and panics into an [`Outcome::Failure`].
pub fn guard<R, F>(thunk: F) -> Outcome<R>
where
    F: FnOnce() -> anyhow::Result<R>,
{
    GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(thunk));
    GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));

    match result {
        Ok(Ok(value)) => Outcome::Success(value),
        Ok(Err(err)) => Outcome::Failure(Diagnostic::from_error(&err)),
        Err(payload) => Outcome::Failure(Diagnostic::from_panic(payload)),
    }
}

/// Route panics raised inside [`guard`] into the next diagnostic.
///
/// Panics outside a guard still reach the previously installed hook.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if GUARD_DEPTH.with(Cell::get) > 0 {
            let trace = format!("{info}\n\nStack backtrace:\n{}", Backtrace::force_capture());
            LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(trace));
        } else {
            previous(info);
        }
    }));
}
