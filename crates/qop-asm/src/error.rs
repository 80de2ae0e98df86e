//! Error types for the assembly parser.

use qop_ir::IrError;
use std::fmt;
use thiserror::Error;

/// A position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Lexer error (invalid token).
    #[error("invalid token '{0}'")]
    LexerError(String),

    /// Unexpected token.
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    /// Unexpected end of input.
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(String),

    /// Malformed parameter list of a dialect type.
    #[error("error during '{keyword}' type parsing: {message}")]
    TypeSyntaxError { keyword: String, message: String },

    /// Type construction or operation encoding rejected by the IR, including
    /// out-of-domain type parameters.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// An accessor component that is neither a value nor an integer.
    #[error("expected SSA value or integer")]
    ExpectedOperandOrInteger,

    /// A fourth accessor component.
    #[error("register accessor lists hold at most 3 components")]
    TooManyAccessors,

    /// Wrong number of operand types after `:`.
    #[error("number of provided operand types ({actual}) doesn't match expected ({expected})")]
    OperandTypeCountMismatch { expected: usize, actual: usize },

    /// More operands than the operation family accepts.
    #[error("'{op}' takes at most {max} operands")]
    TooManyOperands { op: String, max: usize },

    /// Fewer operands than the operation family requires.
    #[error("'{op}' takes at least {min} operands")]
    TooFewOperands { op: String, min: usize },

    /// Operation name outside the dialect.
    #[error("unknown operation '{0}'")]
    UnknownOperationKeyword(String),

    /// Type keyword outside the dialect and the host types.
    #[error("unknown type '{0}'")]
    UnknownTypeKeyword(String),

    /// Attribute given twice, or set explicitly although the syntax sets it.
    #[error("duplicate attribute '{0}'")]
    DuplicateAttribute(String),
}

/// A parse failure with its source position.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{location}: {kind}")]
pub struct ParseError {
    pub location: Location,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(location: Location, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            location,
            kind: kind.into(),
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
