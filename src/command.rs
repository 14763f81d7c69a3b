use crate::controller::Controller;
use anyhow::Result;
use std::collections::BTreeMap;
use thiserror::Error;

/// How a command wants its argument text delivered.
///
/// Chosen once, when the command is registered, so the dispatcher never has to
/// guess what a handler expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// The command takes no arguments; anything typed after the name is ignored.
    None,
    /// The raw argument text, exactly as typed.
    Line,
    /// The argument text split on whitespace.
    Tokens,
}

impl ArgShape {
    /// Convert raw argument text into this shape.
    pub fn apply(self, raw: &str) -> Args<'_> {
        match self {
            ArgShape::None => Args::None,
            ArgShape::Line => Args::Line(raw),
            ArgShape::Tokens => Args::Tokens(raw.split_whitespace().collect()),
        }
    }
}

/// Arguments as delivered to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args<'a> {
    None,
    Line(&'a str),
    Tokens(Vec<&'a str>),
}

impl<'a> Args<'a> {
    /// The raw line, or `""` for other shapes.
    pub fn line(&self) -> &'a str {
        match self {
            Args::Line(line) => *line,
            _ => "",
        }
    }

    /// The whitespace-split tokens, or an empty slice for other shapes.
    pub fn tokens(&self) -> &[&'a str] {
        match self {
            Args::Tokens(tokens) => tokens.as_slice(),
            _ => &[],
        }
    }
}

/// What a command hands back to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to display, or to carry into the next pipeline stage.
    Output(String),
    /// The command ran but has nothing to show.
    Silent,
    /// Stop the console.
    Exit,
}

impl From<String> for Reply {
    fn from(output: String) -> Self {
        Reply::Output(output)
    }
}

impl From<()> for Reply {
    fn from(_: ()) -> Self {
        Reply::Silent
    }
}

/// Everything a handler can see while it runs.
pub struct Invocation<'a> {
    pub controller: &'a mut dyn Controller,
    pub registry: &'a CommandRegistry,
    pub args: Args<'a>,
    /// Output of the previous pipeline stage; empty otherwise.
    pub input: &'a str,
}

/// Handler backing a command name.
pub type Handler = Box<dyn Fn(Invocation<'_>) -> Result<Reply>>;

/// A registered command: its name, argument shape, help text and handler.
pub struct CommandDescriptor {
    name: &'static str,
    shape: ArgShape,
    help: Option<&'static str>,
    handler: Handler,
}

impl CommandDescriptor {
    pub fn new<F>(name: &'static str, shape: ArgShape, handler: F) -> Self
    where
        F: Fn(Invocation<'_>) -> Result<Reply> + 'static,
    {
        Self {
            name,
            shape,
            help: None,
            handler: Box::new(handler),
        }
    }

    /// Attach the text shown by `help <name>`.
    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> ArgShape {
        self.shape
    }

    pub fn help(&self) -> Option<&'static str> {
        self.help
    }

    /// Run the handler. Callers are expected to go through [`crate::fault::guard`].
    pub fn execute(&self, invocation: Invocation<'_>) -> Result<Reply> {
        (self.handler)(invocation)
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("help", &self.help.is_some())
            .finish()
    }
}

/// Raised when a line names a command nobody registered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("*** Unknown syntax: {0}")]
    UnknownCommand(String),
}

/// Immutable map from command name to its descriptor.
///
/// Built once with [`CommandRegistry::builder`]; there is no way to add commands
/// afterwards.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Exact-match lookup.
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// Descriptors sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    commands: BTreeMap<&'static str, CommandDescriptor>,
}

impl RegistryBuilder {
    /// Add a command. A later registration under the same name wins.
    pub fn register(mut self, descriptor: CommandDescriptor) -> Self {
        self.commands.insert(descriptor.name, descriptor);
        self
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands,
        }
    }
}
