//! Type literals.
//!
//! Dialect types are `qubit`, `op`, `circ`, `qureg<[N]>` and `cop<N[, T]>`.
//! Inside an operation they carry a `!` prefix; host types (`index`, `iN`,
//! `fN`) never do.

use qop_ir::{IrResult, Type};

use super::Parser;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::Token;

impl Parser<'_> {
    /// Parse a type as written in an operation's type list: `!`-prefixed
    /// dialect types or bare host types.
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        if self.consume(&Token::Bang) {
            return self.parse_dialect_type();
        }
        let location = self.location();
        let keyword = self.parse_identifier()?;
        match self.host_type(&keyword) {
            Some(ty) => ty.map_err(|e| ParseError::new(location, e)),
            None => Err(ParseError::new(
                location,
                ParseErrorKind::UnknownTypeKeyword(keyword),
            )),
        }
    }

    /// Parse a standalone type literal, where the `!` of dialect types is
    /// optional.
    pub fn parse_type_literal(&mut self) -> ParseResult<Type> {
        match self.peek() {
            Some(Token::Identifier(keyword)) if self.host_type(keyword).is_some() => {
                self.parse_type()
            }
            _ => {
                self.consume(&Token::Bang);
                self.parse_dialect_type()
            }
        }
    }

    /// Parse a dialect type body (the part after `!`).
    pub fn parse_dialect_type(&mut self) -> ParseResult<Type> {
        let location = self.location();
        let keyword = self.parse_identifier()?;
        let ty = match keyword.as_str() {
            "qubit" => Ok(self.types.qubit()),
            "op" => Ok(self.types.op()),
            "circ" => Ok(self.types.circ()),
            "qureg" => {
                self.expect_in_type(&Token::Lt, "qureg")?;
                let size = self.parse_optional_integer();
                self.expect_in_type(&Token::Gt, "qureg")?;
                self.types.qureg(size)
            }
            "cop" => {
                self.expect_in_type(&Token::Lt, "cop")?;
                let num_controls = self
                    .parse_optional_integer()
                    .ok_or_else(|| self.type_syntax("cop", "expected number of controls"))?;
                let base = if self.consume(&Token::Comma) {
                    let base_location = self.location();
                    let base = self.parse_dialect_type().map_err(|e| {
                        ParseError::new(
                            e.location,
                            ParseErrorKind::TypeSyntaxError {
                                keyword: "cop".into(),
                                message: format!("invalid base type: {}", e.kind),
                            },
                        )
                    })?;
                    if !(base.is_op() || base.is_circ()) {
                        return Err(ParseError::new(
                            base_location,
                            ParseErrorKind::TypeSyntaxError {
                                keyword: "cop".into(),
                                message: format!("base type must be 'op' or 'circ', got '{base}'"),
                            },
                        ));
                    }
                    Some(base)
                } else {
                    None
                };
                self.expect_in_type(&Token::Gt, "cop")?;
                self.types.cop(num_controls, base)
            }
            _ => {
                return Err(ParseError::new(
                    location,
                    ParseErrorKind::UnknownTypeKeyword(keyword),
                ));
            }
        };
        ty.map_err(|e| ParseError::new(location, e))
    }

    /// Parse `type (',' type)*`.
    pub(crate) fn parse_type_list(&mut self) -> ParseResult<Vec<Type>> {
        let mut types = vec![self.parse_type()?];
        while self.consume(&Token::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// Resolve `index`, `iN` or `fN`; `None` if `keyword` is not a host type.
    fn host_type(&self, keyword: &str) -> Option<IrResult<Type>> {
        if keyword == "index" {
            return Some(Ok(self.types.index()));
        }
        let (prefix, width) = keyword.split_at_checked(1)?;
        if !width.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let width = width.parse::<u32>().ok()?;
        match prefix {
            "i" => Some(self.types.integer(width)),
            "f" => Some(self.types.float(width)),
            _ => None,
        }
    }

    fn expect_in_type(&mut self, token: &Token, keyword: &str) -> ParseResult<()> {
        if self.consume(token) {
            Ok(())
        } else {
            Err(self.type_syntax(keyword, &format!("expected '{token}'")))
        }
    }

    fn type_syntax(&self, keyword: &str, message: &str) -> ParseError {
        self.error(ParseErrorKind::TypeSyntaxError {
            keyword: keyword.to_string(),
            message: message.to_string(),
        })
    }
}
