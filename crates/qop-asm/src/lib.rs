//! Textual assembly for the qop dialect
//!
//! This crate parses and prints `qop` operations and types, including the
//! register-access operand lists where register operands carry optional
//! `[start, size, step]` accessors.
//!
//! # Supported Syntax
//!
//! | Family | Example |
//! |--------|---------|
//! | Fixed gates | `qop.cx %q0, %q1[2,4] : !qubit, !qureg<8>` |
//! | Unapplied gates | `qop.h -> !op` |
//! | Rotations | `qop.rz(0.5) %q : !qubit`, `qop.rz(%phi) %q : f64, !qubit` |
//! | Controlled ops | `qop.cop %u, %c[0,2], %t[%i] : !op, !qureg<4>, !qureg<8>` |
//! | Adjoint ops | `qop.adj %u, %q : !op, !qubit` |
//! | Circuit calls | `qop.circ @qft(2, %a[0,%n], %b) : !qureg<>, !qubit -> !circ` |
//! | Attributes | `qop.h %q {label = "bell", fused} : !qubit` |
//! | Comments | `// comment` |
//!
//! Run-time accessor operands such as `%i` above are always of type `index`
//! and never appear in the type list.
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qop_asm::{parse_operation, print_operation};
//! use qop_ir::TypeRegistry;
//!
//! let types = TypeRegistry::new();
//! let source = "qop.cx %q0, %q1[2,4] : !qubit, !qureg<8> -> !qubit, !qureg<8>";
//!
//! let op = parse_operation(source, &types).unwrap();
//! let operands = op.logical_operands().unwrap();
//! assert_eq!(operands[0].value.name, "q0");
//! assert!(operands[1].is_register_like());
//!
//! assert_eq!(print_operation(&op).unwrap(), source);
//! ```
//!
//! # Example: Types
//!
//! ```rust
//! use qop_asm::{parse_type, print_type};
//! use qop_ir::TypeRegistry;
//!
//! let types = TypeRegistry::new();
//! let cop = parse_type("cop<2, circ>", &types).unwrap();
//! assert_eq!(cop.num_controls(), Some(2));
//! assert_eq!(print_type(&cop), "cop<2, circ>");
//! assert!(parse_type("qureg<1>", &types).is_err());
//! ```

pub mod config;
pub mod error;
pub mod lexer;
mod parser;
mod printer;

pub use config::{AccessorStyle, AsmConfig, ConfigError};
pub use error::{Location, ParseError, ParseErrorKind, ParseResult};
pub use parser::Parser;
pub use printer::Printer;

use qop_ir::{IrResult, Operation, Type, TypeRegistry};

/// Parse a standalone type literal such as `qureg<4>` or `!cop<1, op>`.
pub fn parse_type(source: &str, types: &TypeRegistry) -> ParseResult<Type> {
    let config = AsmConfig::default();
    let mut parser = Parser::new(source, types, &config)?;
    let ty = parser.parse_type_literal()?;
    parser.expect_eof()?;
    Ok(ty)
}

/// Print a standalone type literal.
pub fn print_type(ty: &Type) -> String {
    Printer::new(&AsmConfig::default()).print_type(ty)
}

/// Parse exactly one operation with the default configuration.
pub fn parse_operation(source: &str, types: &TypeRegistry) -> ParseResult<Operation> {
    let config = AsmConfig::default();
    let mut parser = Parser::new(source, types, &config)?;
    let op = parser.parse_operation()?;
    parser.expect_eof()?;
    Ok(op)
}

/// Parse a sequence of operations with the default configuration.
pub fn parse_operations(source: &str, types: &TypeRegistry) -> ParseResult<Vec<Operation>> {
    let config = AsmConfig::default();
    Parser::new(source, types, &config)?.parse_operations()
}

/// Print an operation with the default configuration.
pub fn print_operation(op: &Operation) -> IrResult<String> {
    Printer::new(&AsmConfig::default()).print_operation(op)
}
