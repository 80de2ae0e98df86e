//! Lexer for qop assembly.

use logos::Logos;

use crate::error::Location;

/// Tokens of the operation and type syntax.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    #[token("true")]
    True,

    #[token("false")]
    False,

    // Literals
    #[regex(r"-?[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| finite_float(lex.slice()))]
    #[regex(r"-?[0-9]+[eE][+-]?[0-9]+", |lex| finite_float(lex.slice()))]
    FloatLiteral(f64),

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLiteral(i64),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| unescape(lex.slice()))]
    StringLiteral(String),

    /// `%name`, stored without the sigil.
    #[regex(r"%[a-zA-Z0-9_$.]+", |lex| lex.slice()[1..].to_string())]
    ValueId(String),

    /// `@name`, stored without the sigil.
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_$.]*", |lex| lex.slice()[1..].to_string())]
    SymbolRef(String),

    // Bare identifiers, including dotted operation names like `qop.cx`
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$.]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token("->")]
    Arrow,

    #[token("!")]
    Bang,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("=")]
    Eq,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::FloatLiteral(v) => write!(f, "{v:?}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::StringLiteral(s) => write!(f, "\"{s}\""),
            Token::ValueId(s) => write!(f, "%{s}"),
            Token::SymbolRef(s) => write!(f, "@{s}"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Arrow => write!(f, "->"),
            Token::Bang => write!(f, "!"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Eq => write!(f, "="),
        }
    }
}

/// Overflowing literals such as `1e999` are lexer errors rather than `inf`.
fn finite_float(slice: &str) -> Option<f64> {
    slice.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn unescape(quoted: &str) -> Option<String> {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted[1..quoted.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            c @ ('"' | '\\') => out.push(c),
            _ => return None,
        }
    }
    Some(out)
}

/// A token with its span and position.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
    pub location: Location,
}

/// Tokenize a source string.
///
/// Invalid input yields an `Err` entry carrying the offending slice.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (Location, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tracker = LineTracker::default();
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let location = tracker.locate(source, span.start);
        match result {
            Ok(token) => tokens.push(Ok(SpannedToken {
                token,
                span,
                location,
            })),
            Err(()) => tokens.push(Err((location, source[span].to_string()))),
        }
    }

    tokens
}

/// Position just past the last character of `source`.
pub fn end_location(source: &str) -> Location {
    LineTracker::default().locate(source, source.len())
}

/// Incremental offset-to-line/column conversion for increasing offsets.
#[derive(Default)]
struct LineTracker {
    scanned: usize,
    line: usize,
    line_start: usize,
}

impl LineTracker {
    fn locate(&mut self, source: &str, offset: usize) -> Location {
        for (i, b) in source.as_bytes()[self.scanned..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.scanned + i + 1;
            }
        }
        self.scanned = offset;
        Location {
            offset,
            line: self.line + 1,
            column: source[self.line_start..offset].chars().count() + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_gate_tokens() {
        let toks = tokens("qop.cx %q0, %q1[2,4] : !qubit");
        assert_eq!(toks[0], Token::Identifier("qop.cx".into()));
        assert_eq!(toks[1], Token::ValueId("q0".into()));
        assert_eq!(toks[2], Token::Comma);
        assert_eq!(toks[3], Token::ValueId("q1".into()));
        assert_eq!(toks[4], Token::LBracket);
        assert_eq!(toks[5], Token::IntLiteral(2));
        assert_eq!(toks[6], Token::Comma);
        assert_eq!(toks[7], Token::IntLiteral(4));
        assert_eq!(toks[8], Token::RBracket);
        assert_eq!(toks[9], Token::Colon);
        assert_eq!(toks[10], Token::Bang);
        assert_eq!(toks[11], Token::Identifier("qubit".into()));
    }

    #[test]
    fn test_type_tokens() {
        let toks = tokens("cop<2, op> -> qureg<>");
        assert_eq!(
            toks,
            vec![
                Token::Identifier("cop".into()),
                Token::Lt,
                Token::IntLiteral(2),
                Token::Comma,
                Token::Identifier("op".into()),
                Token::Gt,
                Token::Arrow,
                Token::Identifier("qureg".into()),
                Token::Lt,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let toks = tokens(r#"-3 0.5 1e-7 -2.0 "a\"b" @qft true"#);
        assert_eq!(toks[0], Token::IntLiteral(-3));
        assert!(matches!(toks[1], Token::FloatLiteral(v) if (v - 0.5).abs() < 1e-12));
        assert!(matches!(toks[2], Token::FloatLiteral(v) if (v - 1e-7).abs() < 1e-18));
        assert!(matches!(toks[3], Token::FloatLiteral(v) if (v + 2.0).abs() < 1e-12));
        assert_eq!(toks[4], Token::StringLiteral("a\"b".into()));
        assert_eq!(toks[5], Token::SymbolRef("qft".into()));
        assert_eq!(toks[6], Token::True);
    }

    #[test]
    fn test_locations_and_comments() {
        let source = "// header\nqop.h\n  %q";
        let toks: Vec<_> = tokenize(source).into_iter().map(Result::unwrap).collect();
        assert_eq!(toks.len(), 2);
        assert_eq!((toks[0].location.line, toks[0].location.column), (2, 1));
        assert_eq!((toks[1].location.line, toks[1].location.column), (3, 3));
        assert_eq!(end_location(source).line, 3);
    }

    #[test]
    fn test_overflowing_float_rejected() {
        for source in ["1e999", "-1.5e400", "2.0e309"] {
            let results = tokenize(source);
            assert!(matches!(results.as_slice(), [Err((_, s))] if s == source), "{source}");
        }
        assert!(matches!(
            tokenize("1e308").as_slice(),
            [Ok(SpannedToken { token: Token::FloatLiteral(_), .. })]
        ));
    }

    #[test]
    fn test_invalid_token() {
        let results = tokenize("qop.h #");
        assert!(matches!(results.last(), Some(Err((_, s))) if s == "#"));
    }
}
