//! Compile-time attribute values attached to operations.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// A constant attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Attribute {
    /// Integer constant.
    Integer(i64),
    /// Floating point constant.
    Float(f64),
    /// String constant.
    String(String),
    /// Boolean constant.
    Bool(bool),
    /// Presence-only attribute.
    Unit,
    /// Reference to a symbol, e.g. a circuit definition.
    SymbolRef(String),
    /// Packed array of 64-bit integers.
    I64Array(Vec<i64>),
    /// Packed vector of 32-bit integers.
    I32Vector(Vec<i32>),
    /// Heterogeneous array.
    Array(Vec<Attribute>),
}

impl Attribute {
    /// Integer payload, if this is an integer attribute.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Attribute::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a float attribute.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Attribute::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Attribute::SymbolRef(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64_array(&self) -> Option<&[i64]> {
        match self {
            Attribute::I64Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32_vector(&self) -> Option<&[i32]> {
        match self {
            Attribute::I32Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Attribute]> {
        match self {
            Attribute::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Integer(v) => write!(f, "{v}"),
            // Debug formatting keeps the decimal point on integral values.
            Attribute::Float(v) => write!(f, "{v:?}"),
            Attribute::String(s) => write_escaped(f, s),
            Attribute::Bool(b) => write!(f, "{b}"),
            Attribute::Unit => Ok(()),
            Attribute::SymbolRef(s) => write!(f, "@{s}"),
            Attribute::I64Array(v) => write_list(f, v),
            Attribute::I32Vector(v) => write_list(f, v),
            Attribute::Array(v) => write_list(f, v),
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Attribute dictionary, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttrDict(BTreeMap<String, Attribute>);

impl AttrDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, returning the previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: Attribute) -> Option<Attribute> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
