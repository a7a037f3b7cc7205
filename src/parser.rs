use crate::list::NodeBuffer;
use crate::node::{Node, RuleKind};
use crate::token::{Side, Token, TokenType};
use crate::{Error, Mode, Parser, Step};

mod declaration;
mod selector;
mod string;
mod value;

impl Parser {
    /// Runs the dispatcher until a node is produced or the stream ends.
    pub(crate) fn next_node(&mut self) -> Result<Option<Node>, Error> {
        loop {
            let step = match self.mode {
                Mode::Main => self.main_loop()?,
                Mode::Property => self.property_loop()?,
                Mode::Selector => self.selector_loop()?,
                Mode::Buffer => self.buffer_loop(),
            };

            match step {
                Step::Emit(node) => return Ok(Some(node)),
                Step::Continue => {}
                Step::Done => return Ok(None),
            }
        }
    }

    fn main_loop(&mut self) -> Result<Step, Error> {
        log::trace!("main_loop");

        let Some(token) = self.next_token() else {
            if self.depth > 0 {
                return Err(Error::new(
                    "unexpected end of input, rules left unclosed".to_string(),
                    self.range,
                ));
            }
            return Ok(Step::Done);
        };

        match token.token_type {
            TokenType::Semicolon => Ok(Step::Continue),
            TokenType::Word(_) | TokenType::Interpolation(_) => {
                if matches!(self.tokens.peek(), Some(t) if t.is_colon()) {
                    self.disambiguate(token)
                } else {
                    Ok(self.begin_rule(token))
                }
            }
            TokenType::AtWord(_) => Err(Error::new(
                "at-rules are not supported yet".to_string(),
                token.range,
            )),
            TokenType::Brace(Side::Close) if self.depth > 0 => {
                self.depth -= 1;
                Ok(Step::Emit(Node::RuleEnd))
            }
            _ => Ok(self.begin_rule(token)),
        }
    }

    /// Starts a style rule. The token goes back into the stream so the
    /// selector parser sees it again.
    fn begin_rule(&mut self, token: Token) -> Step {
        self.tokens.buffer(token);
        self.depth += 1;
        self.mode = Mode::Selector;
        Step::Emit(Node::RuleStart(RuleKind::Style))
    }

    /// Decides between `a: b;` (declaration) and `a:hover { }` (selector).
    ///
    /// The construct cannot be routed locally, so tokens collect into a
    /// pending buffer while the driver peeks ahead for one that settles it.
    /// The pending tokens are then replayed through the buffer stream for
    /// whichever sub parser wins.
    fn disambiguate(&mut self, first: Token) -> Result<Step, Error> {
        log::trace!("disambiguate");

        let mut pending = vec![first];
        if let Some(colon) = self.next_token() {
            pending.push(colon);
        }

        loop {
            let Some(peeked) = self.peek_type() else {
                return Err(Error::new(
                    "unexpected end of input, expected selector or declaration".to_string(),
                    self.range,
                ));
            };

            match peeked {
                TokenType::Brace(Side::Open)
                | TokenType::Ampersand
                | TokenType::Plus
                | TokenType::Arrow
                | TokenType::Tilde
                | TokenType::Asterisk
                | TokenType::Colon => {
                    for token in pending {
                        self.tokens.buffer(token);
                    }
                    self.depth += 1;
                    self.mode = Mode::Selector;
                    return Ok(Step::Emit(Node::RuleStart(RuleKind::Style)));
                }
                TokenType::Brace(Side::Close) | TokenType::Semicolon => {
                    for token in pending {
                        self.tokens.buffer(token);
                    }
                    self.mode = Mode::Property;
                    return Ok(Step::Continue);
                }
                _ => {
                    if let Some(token) = self.next_token() {
                        pending.push(token);
                    }
                }
            }
        }
    }

    fn selector_loop(&mut self) -> Result<Step, Error> {
        log::trace!("selector_loop");

        self.buffer = self.parse_selectors(0)?;
        self.mode = Mode::Buffer;
        Ok(Step::Continue)
    }

    /// Drains the pre-parsed node buffer one node per step; hands control
    /// back to the main loop once it runs dry.
    fn buffer_loop(&mut self) -> Step {
        match self.buffer.take() {
            Some(node) => Step::Emit(node),
            None => {
                self.mode = Mode::Main;
                Step::Continue
            }
        }
    }

    /// Takes the next token and remembers its range for diagnostics.
    pub(crate) fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.next();
        if let Some(t) = &token {
            log::trace!("{:?}", t);
            self.range = t.range;
        }

        token
    }

    /// The next token's type without consuming it.
    pub(crate) fn peek_type(&mut self) -> Option<TokenType> {
        self.tokens.peek().map(|t| t.token_type.clone())
    }

    /// True when the next token is an opening paren.
    pub(crate) fn next_is_paren_open(&mut self) -> bool {
        matches!(self.tokens.peek(), Some(t) if t.is_paren_open())
    }
}

/// Wraps the buffer in a compound pair when it holds two or more items;
/// a single item stays bare.
pub(crate) fn wrap_compound(nodes: &mut NodeBuffer, items: usize, start: Node, end: Node) {
    if items >= 2 {
        nodes.unshift(start);
        nodes.add(end);
    }
}
