//! Register-access operand lists.
//!
//! Gate-like families parse a comma-separated list checked against the
//! family's register-like mask; register-like positions may carry an
//! accessor list. Circuit calls use their own variadic argument list in
//! which every argument is register-like.

use qop_ir::{AccessorTriple, LogicalOperand, OpFamily, Type, Value};

use super::{Parser, ValueRef};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::Token;

/// A logical operand before its type is known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawOperand {
    pub(crate) value: ValueRef,
    pub(crate) accessor: Option<AccessorTriple<ValueRef>>,
}

impl RawOperand {
    /// Attach the operand's type; run-time accessors are always `index`.
    pub(crate) fn resolve(self, ty: Type, index: &Type) -> LogicalOperand {
        LogicalOperand {
            value: self.value.resolve(ty),
            accessor: self
                .accessor
                .map(|acc| acc.map(|v| v.resolve(index.clone()))),
        }
    }
}

/// Arguments of a circuit call: `(n, %a[...], %b, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawCall {
    pub(crate) n: i64,
    pub(crate) args: Vec<(ValueRef, AccessorTriple<ValueRef>)>,
}

impl RawCall {
    pub(crate) fn resolve(self, types: Vec<Type>, index: &Type) -> Vec<(Value, AccessorTriple)> {
        self.args
            .into_iter()
            .zip(types)
            .map(|((value, accessor), ty)| {
                (
                    value.resolve(ty),
                    accessor.map(|v| v.resolve(index.clone())),
                )
            })
            .collect()
    }
}

impl Parser<'_> {
    /// Parse an operand list for `family`. The list may be empty, but a
    /// comma must be followed by another operand.
    pub(crate) fn parse_masked_operands(
        &mut self,
        family: &OpFamily,
        op_name: &str,
    ) -> ParseResult<Vec<RawOperand>> {
        let mut operands = Vec::with_capacity(family.arity());
        let Some(mut value) = self.parse_optional_value() else {
            return Ok(operands);
        };

        loop {
            let Some(&is_reg) = family.reg_like.get(operands.len()) else {
                return Err(ParseError::new(
                    value.location,
                    ParseErrorKind::TooManyOperands {
                        op: op_name.to_string(),
                        max: family.arity(),
                    },
                ));
            };
            let accessor = if is_reg {
                Some(self.parse_accessor_list()?)
            } else {
                None
            };
            operands.push(RawOperand { value, accessor });

            if !self.consume(&Token::Comma) {
                break;
            }
            value = self.parse_value()?;
        }

        Ok(operands)
    }

    /// Parse `'(' int (',' operand [accessor-list])* ')'`.
    pub(crate) fn parse_call_arguments(&mut self) -> ParseResult<RawCall> {
        self.expect(&Token::LParen)?;
        let n = self.parse_integer()?;
        let mut args = Vec::new();
        while self.consume(&Token::Comma) {
            let value = self.parse_value()?;
            let accessor = self.parse_accessor_list()?;
            args.push((value, accessor));
        }
        self.expect(&Token::RParen)?;
        Ok(RawCall { n, args })
    }
}
