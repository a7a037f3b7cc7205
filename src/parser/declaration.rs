use crate::node::Node;
use crate::token::TokenType;
use crate::{Error, Mode, Parser, Step};

impl Parser {
    /// Parses one declaration: the property, its colon, then the value
    /// subtree into the node buffer. The property node is emitted right
    /// away; the values follow from the buffer mode.
    pub(crate) fn property_loop(&mut self) -> Result<Step, Error> {
        log::trace!("property_loop");

        let Some(token) = self.next_token() else {
            return Err(Error::new(
                "unexpected end of input, expected property".to_string(),
                self.range,
            ));
        };

        let property = match token.token_type {
            TokenType::Word(name) => Node::Property(name),
            TokenType::Interpolation(handle) => Node::PropertyRef(handle),
            _ => {
                return Err(Error::new(
                    format!("expected property, got {}", token),
                    token.range,
                ));
            }
        };

        match self.next_token() {
            Some(t) if t.is_colon() => {}
            Some(t) => {
                return Err(Error::new(
                    format!("expected ':' after property, got {}", t),
                    t.range,
                ));
            }
            None => {
                return Err(Error::new(
                    "unexpected end of input, expected ':' after property".to_string(),
                    self.range,
                ));
            }
        }

        self.buffer = self.parse_values(0)?;
        self.mode = Mode::Buffer;

        Ok(Step::Emit(property))
    }
}
