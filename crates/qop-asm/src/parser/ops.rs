//! Operation syntax.
//!
//! Every gate-like family shares one shape:
//!
//! ```text
//! name ['(' scalar ')'] operand-list [attr-dict] [':' types] ['->' types]
//! ```
//!
//! and circuit calls use
//!
//! ```text
//! name '@'callee '(' n (',' operand [accessors])* ')' [attr-dict] [':' types] '->' type
//! ```

use qop_ir::{AttrDict, Attribute, LeadingParam, OpFamily, Operation, ScalarParam, Type};
use tracing::{debug, instrument};

use super::{Parser, ValueRef};
use crate::error::{Location, ParseError, ParseErrorKind, ParseResult};
use crate::lexer::Token;

/// The leading scalar of a parametric gate, before type resolution.
enum RawScalar {
    Operand(ValueRef),
    Literal(f64),
}

impl Parser<'_> {
    /// Parse a single operation.
    #[instrument(skip(self))]
    pub fn parse_operation(&mut self) -> ParseResult<Operation> {
        let location = self.location();
        let name = self.parse_identifier()?;
        let family = self
            .config
            .mnemonic(&name)
            .and_then(OpFamily::lookup)
            .ok_or_else(|| {
                ParseError::new(location, ParseErrorKind::UnknownOperationKeyword(name.clone()))
            })?;

        debug!("Parsing {} as {:?}", name, family.kind);
        if family.is_variadic() {
            self.parse_circuit_call(family, location)
        } else {
            self.parse_gate(family, &name, location)
        }
    }

    /// Parse operations until the input is exhausted.
    pub fn parse_operations(&mut self) -> ParseResult<Vec<Operation>> {
        let mut operations = Vec::new();
        while !self.is_eof() {
            operations.push(self.parse_operation()?);
        }
        debug!("Parsed {} operations", operations.len());
        Ok(operations)
    }

    fn parse_gate(
        &mut self,
        family: &'static OpFamily,
        name: &str,
        location: Location,
    ) -> ParseResult<Operation> {
        let scalar = match family.leading() {
            LeadingParam::Scalar => Some(self.parse_leading_scalar()?),
            LeadingParam::None => None,
        };
        let operands = self.parse_masked_operands(family, name)?;
        if operands.len() < family.min_arity {
            return Err(self.error(ParseErrorKind::TooFewOperands {
                op: name.to_string(),
                min: family.min_arity,
            }));
        }
        let attributes = self.parse_optional_attr_dict(|key| family.is_reserved_attr(key))?;

        let runtime_scalar = usize::from(matches!(scalar, Some(RawScalar::Operand(_))));
        let mut types = self
            .parse_operand_types(runtime_scalar + operands.len())?
            .into_iter();
        let result_types = self.parse_result_types()?;

        let scalar = match scalar {
            Some(RawScalar::Operand(value)) => types
                .next()
                .map(|ty| ScalarParam::RuntimeOperand(value.resolve(ty))),
            Some(RawScalar::Literal(phi)) => Some(ScalarParam::CompileTimeConstant(phi)),
            None => None,
        };
        let index = self.types.index();
        let operands = operands
            .into_iter()
            .zip(types)
            .map(|(raw, ty)| raw.resolve(ty, &index))
            .collect();

        let op = Operation::gate(family, scalar, operands, result_types)
            .map_err(|e| ParseError::new(location, e))?;
        Ok(with_user_attributes(op, attributes))
    }

    fn parse_circuit_call(
        &mut self,
        family: &'static OpFamily,
        location: Location,
    ) -> ParseResult<Operation> {
        let callee = match self.peek() {
            Some(Token::SymbolRef(name)) => {
                let name = name.clone();
                self.advance();
                name
            }
            _ => return Err(self.unexpected("callee symbol")),
        };
        let call = self.parse_call_arguments()?;
        let attributes = self.parse_optional_attr_dict(|key| family.is_reserved_attr(key))?;
        let types = self.parse_operand_types(call.args.len())?;
        self.expect(&Token::Arrow)?;
        let result = self.parse_type()?;

        let n = call.n;
        let args = call.resolve(types, &self.types.index());
        let op = Operation::circuit_call(callee, n, args, result)
            .map_err(|e| ParseError::new(location, e))?;
        Ok(with_user_attributes(op, attributes))
    }

    /// `'(' (operand | literal) ')'`: an operand wins if one is present.
    fn parse_leading_scalar(&mut self) -> ParseResult<RawScalar> {
        self.expect(&Token::LParen)?;
        let scalar = match self.parse_optional_value() {
            Some(value) => RawScalar::Operand(value),
            None => {
                let location = self.location();
                match self.parse_attribute() {
                    Ok(Attribute::Float(v)) => RawScalar::Literal(v),
                    #[allow(clippy::cast_precision_loss)]
                    Ok(Attribute::Integer(v)) => RawScalar::Literal(v as f64),
                    Ok(other) => {
                        return Err(ParseError::new(
                            location,
                            ParseErrorKind::UnexpectedToken {
                                expected: "operand or float literal".into(),
                                found: other.to_string(),
                            },
                        ));
                    }
                    Err(_) => return Err(self.unexpected("operand or float literal")),
                }
            }
        };
        self.expect(&Token::RParen)?;
        Ok(scalar)
    }

    /// Parse the optional `':' types` clause and check it lists exactly
    /// `expected` types.
    fn parse_operand_types(&mut self, expected: usize) -> ParseResult<Vec<Type>> {
        let location = self.location();
        let types = if self.consume(&Token::Colon) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        if types.len() != expected {
            return Err(ParseError::new(
                location,
                ParseErrorKind::OperandTypeCountMismatch {
                    expected,
                    actual: types.len(),
                },
            ));
        }
        Ok(types)
    }

    fn parse_result_types(&mut self) -> ParseResult<Vec<Type>> {
        if self.consume(&Token::Arrow) {
            self.parse_type_list()
        } else {
            Ok(Vec::new())
        }
    }
}

fn with_user_attributes(mut op: Operation, attributes: AttrDict) -> Operation {
    for (name, value) in attributes.iter() {
        op.attributes.insert(name, value.clone());
    }
    op
}
