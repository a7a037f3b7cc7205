use crate::list::NodeBuffer;
use crate::node::Node;
use crate::token::{QuoteKind, TokenType};
use crate::{Error, Parser};

impl Parser {
    /// Parses the interior of a quoted string, after its opening quote.
    ///
    /// A plain string collapses to a single `Value` that keeps its quotes.
    /// As soon as an interpolation splits the fragments, the pieces are
    /// framed by `StringStart`/`StringEnd` and the quote moves onto the
    /// frame.
    pub(crate) fn parse_string(&mut self, kind: QuoteKind) -> Result<NodeBuffer, Error> {
        log::trace!("parse_string");

        let mut nodes = NodeBuffer::new();
        let mut raw = String::new();
        let mut interpolated = false;

        loop {
            let Some(token) = self.next_token() else {
                return Err(Error::new(
                    "unexpected end of input, unterminated string".to_string(),
                    self.range,
                ));
            };

            match token.token_type {
                TokenType::Str(fragment) => {
                    raw.push_str(&fragment);
                }
                TokenType::Interpolation(handle) => {
                    if !raw.is_empty() {
                        nodes.add(Node::Value(std::mem::take(&mut raw)));
                    }
                    nodes.add(Node::ValueRef(handle));
                    interpolated = true;
                }
                TokenType::Quote(closing) if closing == kind => {
                    if interpolated || nodes.size() > 1 {
                        if !raw.is_empty() {
                            nodes.add(Node::Value(raw));
                        }
                        nodes.unshift(Node::StringStart(kind.as_str().to_string()));
                        nodes.add(Node::StringEnd);
                    } else {
                        let quote = kind.as_str();
                        nodes.add(Node::Value(format!("{quote}{raw}{quote}")));
                    }
                    return Ok(nodes);
                }
                _ => {
                    return Err(Error::new(
                        format!("unexpected token {} in string", token),
                        token.range,
                    ));
                }
            }
        }
    }
}
