use crate::location::Range;
use std::fmt;

/// Opaque identifier for a host-supplied interpolation value.
///
/// The parser never inspects a handle; it only moves it from the token
/// stream into the matching `*Ref` node, in stream order.
pub type Handle = usize;

/// Quote flavour of a string boundary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Double,
    Single,
}

impl QuoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteKind::Double => "\"",
            QuoteKind::Single => "'",
        }
    }
}

/// Open/close marker for brace and paren tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Open,
    Close,
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A word: selector text, property name, keyword or numeric value.
    /// Words arrive exactly as written, marker characters (`.`, `#`, `--`)
    /// included.
    Word(String),
    /// An at-keyword. The value does not include the `@` marker.
    AtWord(String),
    /// A raw string fragment between quotes, or a raw `url(...)` argument.
    Str(String),
    /// A host-supplied value spliced in at this position.
    Interpolation(Handle),
    Quote(QuoteKind),
    Brace(Side),
    Paren(Side),
    Colon,
    Semicolon,
    Comma,
    /// `>`
    Arrow,
    /// `+`
    Plus,
    /// `~`
    Tilde,
    /// `*`
    Asterisk,
    /// `&`
    Ampersand,
    /// `!`
    Exclamation,
    /// Advisory adjacency marker the lexer emits between template segments.
    /// The parser derives adjacency from ranges and skips this token.
    WordCombinator,
}

/// A lexer token: a token type plus the source range it covers.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Range of the token in the template source
    pub range: Range,
}

impl Token {
    /// Returns a new token of the given type on the given range
    pub fn new(token_type: TokenType, range: Range) -> Token {
        Token { token_type, range }
    }

    pub fn new_word(value: &str, range: Range) -> Token {
        Token::new(TokenType::Word(value.to_string()), range)
    }

    pub fn new_at_word(keyword: &str, range: Range) -> Token {
        Token::new(TokenType::AtWord(keyword.to_string()), range)
    }

    pub fn new_str(value: &str, range: Range) -> Token {
        Token::new(TokenType::Str(value.to_string()), range)
    }

    pub fn new_interpolation(handle: Handle, range: Range) -> Token {
        Token::new(TokenType::Interpolation(handle), range)
    }

    pub fn new_quote(kind: QuoteKind, range: Range) -> Token {
        Token::new(TokenType::Quote(kind), range)
    }
}

impl Token {
    pub(crate) fn is_colon(&self) -> bool {
        matches!(self.token_type, TokenType::Colon)
    }

    pub(crate) fn is_arrow(&self) -> bool {
        matches!(self.token_type, TokenType::Arrow)
    }

    pub(crate) fn is_paren_open(&self) -> bool {
        matches!(self.token_type, TokenType::Paren(Side::Open))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match &self.token_type {
            TokenType::Word(value) | TokenType::Str(value) => value.clone(),
            TokenType::AtWord(value) => format!("@{}", value),
            TokenType::Interpolation(handle) => format!("${{{}}}", handle),
            TokenType::Quote(kind) => kind.as_str().into(),
            TokenType::Brace(Side::Open) => "{".into(),
            TokenType::Brace(Side::Close) => "}".into(),
            TokenType::Paren(Side::Open) => "(".into(),
            TokenType::Paren(Side::Close) => ")".into(),
            TokenType::Colon => ":".into(),
            TokenType::Semicolon => ";".into(),
            TokenType::Comma => ",".into(),
            TokenType::Arrow => ">".into(),
            TokenType::Plus => "+".into(),
            TokenType::Tilde => "~".into(),
            TokenType::Asterisk => "*".into(),
            TokenType::Ampersand => "&".into(),
            TokenType::Exclamation => "!".into(),
            TokenType::WordCombinator => "".into(),
        };

        write!(f, "{string}")
    }
}
