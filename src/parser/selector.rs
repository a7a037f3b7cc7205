use crate::list::NodeBuffer;
use crate::node::Node;
use crate::parser::wrap_compound;
use crate::token::{Side, TokenType};
use crate::{Error, Parser};

impl Parser {
    /// Parses one selector group.
    ///
    /// At the top level the group ends on the opening brace of the rule
    /// body, which is consumed here; inside a pseudo-class function it ends
    /// on the closing paren. Combinators are woven in after every atomic
    /// selector, derived from explicit tokens or from the column gap
    /// between neighbours.
    pub(crate) fn parse_selectors(&mut self, level: usize) -> Result<NodeBuffer, Error> {
        log::trace!("parse_selectors");

        let mut nodes = NodeBuffer::new();
        let mut items = 0usize;

        loop {
            let Some(token) = self.next_token() else {
                return Err(Error::new(
                    "unexpected end of input in selectors".to_string(),
                    self.range,
                ));
            };

            match token.token_type {
                TokenType::Colon => {
                    items += self.parse_pseudo(&mut nodes, level)?;
                    self.insert_combinator(&mut nodes)?;
                }
                TokenType::Asterisk => {
                    nodes.add(Node::UniversalSelector);
                    items += 1;
                    self.insert_combinator(&mut nodes)?;
                }
                TokenType::Ampersand => {
                    nodes.add(Node::ParentSelector);
                    items += 1;
                    self.insert_combinator(&mut nodes)?;
                }
                TokenType::Word(word) => {
                    nodes.add(Node::Selector(word));
                    items += 1;
                    self.insert_combinator(&mut nodes)?;
                }
                TokenType::Interpolation(handle) => {
                    nodes.add(Node::SelectorRef(handle));
                    items += 1;
                    self.insert_combinator(&mut nodes)?;
                }
                // advisory marker from the lexer; adjacency comes from ranges
                TokenType::WordCombinator => {}
                TokenType::Comma => {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundSelectorStart,
                        Node::CompoundSelectorEnd,
                    );
                    let rest = self.parse_selectors(level)?;
                    nodes.concat(rest);
                    return Ok(nodes);
                }
                TokenType::Paren(Side::Close) if level > 0 => {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundSelectorStart,
                        Node::CompoundSelectorEnd,
                    );
                    return Ok(nodes);
                }
                TokenType::Brace(Side::Open) if level == 0 => {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundSelectorStart,
                        Node::CompoundSelectorEnd,
                    );
                    return Ok(nodes);
                }
                _ => {
                    return Err(Error::new(
                        format!("unexpected token {} in selectors", token),
                        token.range,
                    ));
                }
            }
        }
    }

    /// Parses a pseudo-class after its colon. Returns the number of items
    /// added to the buffer.
    fn parse_pseudo(&mut self, nodes: &mut NodeBuffer, level: usize) -> Result<usize, Error> {
        log::trace!("parse_pseudo");

        let Some(token) = self.next_token() else {
            return Err(Error::new(
                "unexpected end of input, expected pseudo-class".to_string(),
                self.range,
            ));
        };

        match token.token_type {
            TokenType::Word(word) => {
                if self.next_is_paren_open() {
                    let _ = self.next_token();
                    let mut arguments = self.parse_selectors(level + 1)?;
                    arguments.unshift(Node::FunctionStart(format!(":{word}")));
                    arguments.add(Node::FunctionEnd);
                    nodes.concat(arguments);
                } else {
                    nodes.add(Node::Selector(format!(":{word}")));
                }
                Ok(1)
            }
            TokenType::Interpolation(handle) => {
                nodes.add(Node::Selector(":".to_string()));
                nodes.add(Node::SelectorRef(handle));
                Ok(2)
            }
            _ => Err(Error::new(
                format!("expected pseudo-class after ':', got {}", token),
                token.range,
            )),
        }
    }

    /// Decides which combinator, if any, joins the selector that was just
    /// emitted to whatever follows. Explicit combinator tokens win; a space
    /// combinator is derived from the column gap between the two tokens.
    fn insert_combinator(&mut self, nodes: &mut NodeBuffer) -> Result<(), Error> {
        let previous_end = self.range.end;

        let Some(peeked) = self.tokens.peek() else {
            return Ok(());
        };
        let peeked_type = peeked.token_type.clone();
        let peeked_start = peeked.range.start;

        match peeked_type {
            TokenType::Arrow => {
                let _ = self.next_token();
                if matches!(self.tokens.peek(), Some(t) if t.is_arrow()) {
                    let _ = self.next_token();
                    nodes.add(Node::DoubledChildCombinator);
                } else {
                    nodes.add(Node::ChildCombinator);
                }
                self.expect_selector_after_combinator()
            }
            TokenType::Plus => {
                let _ = self.next_token();
                nodes.add(Node::NextSiblingCombinator);
                self.expect_selector_after_combinator()
            }
            TokenType::Tilde => {
                let _ = self.next_token();
                nodes.add(Node::SubsequentSiblingCombinator);
                self.expect_selector_after_combinator()
            }
            // combinators never sit next to a comma, a brace, a paren or a
            // pseudo-class colon
            TokenType::Comma | TokenType::Paren(_) | TokenType::Brace(_) | TokenType::Colon => {
                Ok(())
            }
            _ => {
                // more than one column apart on the same row means the
                // source had whitespace between the two selectors
                if peeked_start.line == previous_end.line
                    && peeked_start.column > previous_end.column + 1
                {
                    nodes.add(Node::SpaceCombinator);
                }
                Ok(())
            }
        }
    }

    /// An explicit combinator must be followed by something that produces a
    /// selector.
    fn expect_selector_after_combinator(&mut self) -> Result<(), Error> {
        let Some(peeked) = self.tokens.peek() else {
            return Err(Error::new(
                "unexpected end of input after combinator".to_string(),
                self.range,
            ));
        };

        match peeked.token_type {
            TokenType::Colon
            | TokenType::Comma
            | TokenType::Paren(Side::Close)
            | TokenType::Brace(Side::Open) => Err(Error::new(
                format!("expected selector after combinator, got {}", peeked),
                peeked.range,
            )),
            _ => Ok(()),
        }
    }
}
