//! Parser for qop assembly.
//!
//! [`Parser`] is a cursor over the token stream. The generic primitives
//! (values, integers, attributes, attribute dictionaries) live here; the
//! dialect-specific grammar is split across submodules: `types` for type
//! literals, `accessor` for bracketed register accessors, `operands` for
//! register-access operand lists and `ops` for whole operations.

mod accessor;
mod operands;
mod ops;
mod types;

use qop_ir::{AttrDict, Attribute, Type, TypeRegistry, Value};

use crate::config::AsmConfig;
use crate::error::{Location, ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{SpannedToken, Token, end_location, tokenize};

/// A `%name` reference whose type is not known yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValueRef {
    pub(crate) name: String,
    pub(crate) location: Location,
}

impl ValueRef {
    pub(crate) fn resolve(self, ty: Type) -> Value {
        Value::new(self.name, ty)
    }
}

/// Parser state.
pub struct Parser<'a> {
    tokens: Vec<SpannedToken>,
    pos: usize,
    end: Location,
    types: &'a TypeRegistry,
    config: &'a AsmConfig,
}

impl<'a> Parser<'a> {
    /// Tokenize `source`; fails on the first invalid token.
    pub fn new(source: &str, types: &'a TypeRegistry, config: &'a AsmConfig) -> ParseResult<Self> {
        let tokens = tokenize(source)
            .into_iter()
            .map(|result| {
                result.map_err(|(location, slice)| {
                    ParseError::new(location, ParseErrorKind::LexerError(slice))
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Self {
            tokens,
            pos: 0,
            end: end_location(source),
            types,
            config,
        })
    }

    /// Check if we've reached the end.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Fail unless all input has been consumed.
    pub fn expect_eof(&self) -> ParseResult<()> {
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    /// Peek at the current token.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Location of the current token, or of the end of input.
    pub(crate) fn location(&self) -> Location {
        self.tokens.get(self.pos).map_or(self.end, |t| t.location)
    }

    /// Advance and return the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Check if current token matches.
    pub(crate) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(crate) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Expect a specific token.
    pub(crate) fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        if self.consume(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{expected}'")))
        }
    }

    /// Error at the current location.
    pub(crate) fn error(&self, kind: impl Into<ParseErrorKind>) -> ParseError {
        ParseError::new(self.location(), kind)
    }

    /// Error describing what was expected at the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(found) => self.error(ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            }),
            None => self.error(ParseErrorKind::UnexpectedEof(expected.to_string())),
        }
    }

    /// Parse an identifier.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(Token::Identifier(s)) => {
                let s = s.clone();
                self.pos += 1;
                Ok(s)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Parse an integer literal.
    pub(crate) fn parse_integer(&mut self) -> ParseResult<i64> {
        self.parse_optional_integer()
            .ok_or_else(|| self.unexpected("integer"))
    }

    pub(crate) fn parse_optional_integer(&mut self) -> Option<i64> {
        match self.peek() {
            Some(Token::IntLiteral(v)) => {
                let v = *v;
                self.pos += 1;
                Some(v)
            }
            _ => None,
        }
    }

    /// Parse `%name` if present.
    pub(crate) fn parse_optional_value(&mut self) -> Option<ValueRef> {
        let location = self.location();
        match self.peek() {
            Some(Token::ValueId(name)) => {
                let name = name.clone();
                self.pos += 1;
                Some(ValueRef { name, location })
            }
            _ => None,
        }
    }

    pub(crate) fn parse_value(&mut self) -> ParseResult<ValueRef> {
        self.parse_optional_value()
            .ok_or_else(|| self.unexpected("SSA value"))
    }

    /// Parse an attribute value.
    pub(crate) fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        let attr = match self.peek() {
            Some(Token::IntLiteral(v)) => Attribute::Integer(*v),
            Some(Token::FloatLiteral(v)) => Attribute::Float(*v),
            Some(Token::StringLiteral(s)) => Attribute::String(s.clone()),
            Some(Token::SymbolRef(s)) => Attribute::SymbolRef(s.clone()),
            Some(Token::True) => Attribute::Bool(true),
            Some(Token::False) => Attribute::Bool(false),
            Some(Token::LBracket) => {
                self.pos += 1;
                let mut items = Vec::new();
                if !self.consume(&Token::RBracket) {
                    loop {
                        items.push(self.parse_attribute()?);
                        if !self.consume(&Token::Comma) {
                            break;
                        }
                    }
                    self.expect(&Token::RBracket)?;
                }
                return Ok(Attribute::Array(items));
            }
            _ => return Err(self.unexpected("attribute value")),
        };
        self.pos += 1;
        Ok(attr)
    }

    /// Parse `{name = value, flag, ...}` if present.
    ///
    /// Names for which `reserved` returns true are rejected, as are names
    /// given twice.
    pub(crate) fn parse_optional_attr_dict(
        &mut self,
        reserved: impl Fn(&str) -> bool,
    ) -> ParseResult<AttrDict> {
        let mut dict = AttrDict::new();
        if !self.consume(&Token::LBrace) {
            return Ok(dict);
        }
        if self.consume(&Token::RBrace) {
            return Ok(dict);
        }

        loop {
            let location = self.location();
            let name = self.parse_identifier()?;
            let value = if self.consume(&Token::Eq) {
                self.parse_attribute()?
            } else {
                Attribute::Unit
            };
            if reserved(&name) || dict.contains(&name) {
                return Err(ParseError::new(
                    location,
                    ParseErrorKind::DuplicateAttribute(name),
                ));
            }
            dict.insert(name, value);

            if !self.consume(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RBrace)?;
        Ok(dict)
    }
}
