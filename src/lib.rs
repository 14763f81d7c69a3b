//! Interactive console for the Genome Annotation Generator (GAG).
//!
//! The console reads one line at a time, splits it on unquoted pipes, and runs
//! each command against a [`Controller`] that owns the genome being edited.
//! The output of one command is carried into the next, so
//! `barfseq seq_1 1 100 | barf` works as expected. A failing command never
//! brings the console down: its error is reported and the prompt returns.
//!
//! The main entry point is [`Shell`]. Commands live in a [`CommandRegistry`]
//! built once at startup; [`gag_commands`] provides the standard set.

mod builtin;
pub mod command;
pub mod controller;
pub mod fault;
pub mod history;
mod interpreter;
pub mod io_adapters;
pub mod pipeline;
pub mod settings;
pub mod tokenizer;

pub use builtin::{gag_commands, greeting};
pub use command::CommandRegistry;
pub use controller::{Controller, DetachedController};
pub use interpreter::{Flow, Shell};
pub use settings::Settings;
