use crate::list::NodeBuffer;
use crate::location::Range;
use crate::node::Node;
use crate::stream::{BufferStream, LazyStream};
use crate::token::Token;
use thiserror::Error;

pub mod list;
pub mod location;
pub mod node;
mod parser;
pub mod stream;
pub mod token;
pub mod walker;

/// This parser consumes a pre-tokenised, interpolation-aware CSS-in-JS
/// source and produces a flat stream of nodes in the Intermediate Style
/// Token Format (ISTF). Splitting the template literal into tokens is the
/// lexer's job and happens upstream; prefixing and code generation happen
/// downstream. This crate is the middle stage: it resolves the
/// declaration-or-selector ambiguity, recurses through selectors, values,
/// strings and functions, and flattens everything into one self-delimiting
/// event stream.
pub struct Parser {
    /// Upstream tokens, wrapped for push-back during disambiguation
    tokens: BufferStream<Token>,
    /// Dispatch mode of the pull driver
    mode: Mode,
    /// Current rule nesting depth
    depth: usize,
    /// Range of the last observed token, for diagnostics
    range: Range,
    /// Pre-parsed nodes drained by the buffer mode
    buffer: NodeBuffer,
}

/// A parse failure on the given token range.
///
/// The parser fails fast: the first structural violation surfaces at the
/// pull boundary and the parser is poisoned afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {range}")]
pub struct Error {
    /// The error message
    pub message: String,
    /// Range of the last observed token
    pub range: Range,
}

impl Error {
    pub(crate) fn new(message: String, range: Range) -> Error {
        Error { message, range }
    }
}

/// Dispatch states of the pull driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Main,
    Property,
    Selector,
    Buffer,
}

/// Outcome of one dispatcher step.
enum Step {
    Emit(Node),
    Continue,
    Done,
}

impl Parser {
    /// Creates a parser over a lazy token stream.
    pub fn new(tokens: LazyStream<Token>) -> Self {
        Self {
            tokens: BufferStream::new(tokens),
            mode: Mode::Main,
            depth: 0,
            range: Range::default(),
            buffer: NodeBuffer::new(),
        }
    }

    /// Parses an already materialised token sequence into a node vector.
    pub fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, Error> {
        Parser::new(LazyStream::from_vec(tokens)).collect()
    }

    /// Turns the parser into a lazy node stream, the same shape it consumes
    /// tokens in. Downstream stages peek and junk it like any other stream.
    pub fn into_stream(mut self) -> LazyStream<Result<Node, Error>> {
        LazyStream::new(move || self.next())
    }
}

/// Nodes come out one per pull, in source order. Errors surface at the pull
/// boundary; after the first `Err` the parser is poisoned and further pulls
/// return unspecified results. The parser holds no external resources, so
/// dropping it mid-stream is always safe.
impl Iterator for Parser {
    type Item = Result<Node, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_node() {
            Ok(Some(node)) => Some(Ok(node)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
