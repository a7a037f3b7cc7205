use crate::list::NodeBuffer;
use crate::node::Node;
use crate::parser::wrap_compound;
use crate::token::{Side, TokenType};
use crate::{Error, Parser};

impl Parser {
    /// Parses the right-hand side of a declaration into a node buffer.
    ///
    /// `level` tracks parenthesis nesting. Inside a function the list ends
    /// on the closing paren, which is consumed here; at the top level it
    /// ends on `;`, `}` or the end of the stream, which stay in the stream
    /// because the main loop owns them.
    pub(crate) fn parse_values(&mut self, level: usize) -> Result<NodeBuffer, Error> {
        log::trace!("parse_values");

        let mut nodes = NodeBuffer::new();
        let mut items = 0usize;

        loop {
            match self.peek_type() {
                None => {
                    if level > 0 {
                        return Err(Error::new(
                            "unexpected end of input in values, unclosed function".to_string(),
                            self.range,
                        ));
                    }
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundValueStart,
                        Node::CompoundValueEnd,
                    );
                    return Ok(nodes);
                }
                Some(TokenType::Brace(Side::Close)) | Some(TokenType::Semicolon)
                    if level == 0 =>
                {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundValueStart,
                        Node::CompoundValueEnd,
                    );
                    return Ok(nodes);
                }
                Some(_) => {}
            }

            let Some(token) = self.next_token() else {
                return Err(Error::new(
                    "unexpected end of input in values".to_string(),
                    self.range,
                ));
            };

            match token.token_type {
                TokenType::Word(word) => {
                    if self.next_is_paren_open() {
                        let _ = self.next_token();
                        let mut arguments = self.parse_values(level + 1)?;
                        arguments.unshift(Node::FunctionStart(word));
                        arguments.add(Node::FunctionEnd);
                        nodes.concat(arguments);
                    } else {
                        nodes.add(Node::Value(word));
                    }
                    items += 1;
                }
                TokenType::Quote(kind) => {
                    let string = self.parse_string(kind)?;
                    nodes.concat(string);
                    items += 1;
                }
                TokenType::Str(value) if level > 0 => {
                    // raw url()/calc() argument
                    nodes.add(Node::Value(value));
                    items += 1;
                }
                TokenType::Interpolation(handle) => {
                    nodes.add(Node::ValueRef(handle));
                    items += 1;
                }
                TokenType::Comma => {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundValueStart,
                        Node::CompoundValueEnd,
                    );
                    let rest = self.parse_values(level)?;
                    nodes.concat(rest);
                    return Ok(nodes);
                }
                TokenType::Paren(Side::Close) if level > 0 => {
                    wrap_compound(
                        &mut nodes,
                        items,
                        Node::CompoundValueStart,
                        Node::CompoundValueEnd,
                    );
                    return Ok(nodes);
                }
                _ => {
                    return Err(Error::new(
                        format!("unexpected token {} in values", token),
                        token.range,
                    ));
                }
            }
        }
    }
}
