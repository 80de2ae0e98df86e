//! Register accessor lists: `[start, size, step]`.

use qop_ir::{Accessor, AccessorTriple, DYNAMIC, MAX_ACCESSORS};
use tracing::trace;

use super::{Parser, ValueRef};
use crate::error::{ParseErrorKind, ParseResult};
use crate::lexer::Token;

impl Parser<'_> {
    /// Parse an optional bracketed accessor list. Absent brackets and `[]`
    /// both yield the whole-register accessor.
    pub(crate) fn parse_accessor_list(&mut self) -> ParseResult<AccessorTriple<ValueRef>> {
        if !self.consume(&Token::LBracket) {
            return Ok(AccessorTriple::empty());
        }

        let mut components = Vec::with_capacity(MAX_ACCESSORS);
        if !self.consume(&Token::RBracket) {
            loop {
                if components.len() == MAX_ACCESSORS {
                    return Err(self.error(ParseErrorKind::TooManyAccessors));
                }
                components.push(self.parse_accessor()?);
                if !self.consume(&Token::Comma) {
                    break;
                }
            }
            self.expect(&Token::RBracket)?;
        }

        trace!(
            components = components.len(),
            dynamic = components.iter().filter(|c| c.is_dynamic()).count(),
            "parsed accessor list"
        );
        AccessorTriple::new(components).map_err(|e| self.error(e))
    }

    /// A value reference if one follows, otherwise an integer literal.
    fn parse_accessor(&mut self) -> ParseResult<Accessor<ValueRef>> {
        if let Some(value) = self.parse_optional_value() {
            return Ok(Accessor::Dynamic(value));
        }
        match self.peek() {
            // The sentinel itself cannot be stored as a literal.
            Some(Token::IntLiteral(v)) if *v != DYNAMIC => {
                let v = *v;
                self.advance();
                Ok(Accessor::Static(v))
            }
            _ => Err(self.error(ParseErrorKind::ExpectedOperandOrInteger)),
        }
    }
}
