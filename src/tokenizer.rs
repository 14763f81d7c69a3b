//! Splitting of a raw console line into command segments.
//!
//! The console only understands one operator: `|`, which chains commands so that
//! the output of one becomes the input of the next. Everything between pipes is
//! kept verbatim (quotes included) and handed to the command that owns it.

/// One command invocation: the command name and its untouched argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSegment {
    /// The command name, never empty.
    pub name: String,
    /// Everything after the first run of whitespace following the name.
    pub args: String,
}

impl CommandSegment {
    /// Split a segment on its first whitespace.
    ///
    /// Returns `None` for blank text, so a segment always has a name.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (name, args) = match text.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (text, ""),
        };
        Some(Self {
            name: name.to_string(),
            args: args.to_string(),
        })
    }
}

/// Result of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Nothing but whitespace.
    Empty,
    /// A single command without any unquoted pipe.
    Single(CommandSegment),
    /// Two or more trimmed segments, in execution order. Segments may be empty.
    Pipeline(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Closed,
    Open(char),
}

struct SegmentSplitter {
    input: Vec<char>,
    pos: usize,
    quote: QuoteState,
    segments: Vec<String>,
    buffer: String,
}

impl SegmentSplitter {
    fn new(line: &str) -> Self {
        SegmentSplitter {
            input: line.chars().collect(),
            pos: 0,
            quote: QuoteState::Closed,
            segments: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Runs the scan to completion.
    ///
    /// An unterminated quote simply swallows the rest of the line into the last
    /// segment.
    fn split(mut self) -> Vec<String> {
        while let Some(ch) = self.read_char() {
            match self.quote {
                QuoteState::Closed => self.handle_unquoted(ch),
                QuoteState::Open(quote) => self.handle_quoted(ch, quote),
            }
        }
        self.finish_segment();
        self.segments
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_unquoted(&mut self, ch: char) {
        match ch {
            '|' => self.finish_segment(),
            '\'' | '"' => {
                self.quote = QuoteState::Open(ch);
                self.buffer.push(ch);
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_quoted(&mut self, ch: char, quote: char) {
        if ch == quote {
            self.quote = QuoteState::Closed;
        }
        self.buffer.push(ch);
    }

    fn finish_segment(&mut self) {
        let segment = std::mem::take(&mut self.buffer);
        self.segments.push(segment.trim().to_string());
    }
}

/// Split a line on unquoted pipes, trimming every segment.
///
/// Always returns at least one (possibly empty) segment.
pub fn split_segments(line: &str) -> Vec<String> {
    SegmentSplitter::new(line).split()
}

/// Tokenize a line into a single command or a pipeline of segments.
pub fn tokenize(line: &str) -> Parsed {
    let mut segments = split_segments(line);
    if segments.len() > 1 {
        return Parsed::Pipeline(segments);
    }
    match segments.pop().as_deref().and_then(CommandSegment::parse) {
        Some(segment) => Parsed::Single(segment),
        None => Parsed::Empty,
    }
}
