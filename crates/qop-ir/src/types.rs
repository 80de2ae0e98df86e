//! Quantum value types and the interned [`Type`] handle.
//!
//! Every [`Type`] is produced by a [`TypeRegistry`](crate::TypeRegistry) and
//! compares by identity: two handles are equal exactly when they point at the
//! same interned [`TypeKind`], which the registry guarantees happens exactly
//! when their kinds are structurally equal.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Structural description of a type; the interning key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A single qubit.
    Qubit,
    /// A qubit register, optionally of statically known size (> 1).
    Qureg {
        /// Number of qubits, if known.
        size: Option<u32>,
    },
    /// A quantum operation value (an unapplied gate).
    Op,
    /// A controlled operation.
    COp {
        /// Number of control qubits (> 0).
        num_controls: u32,
        /// The wrapped operation type, `op` or `circ`.
        base: Option<Type>,
    },
    /// A quantum circuit value.
    Circ,
    /// The host `index` type, used for run-time accessor operands.
    Index,
    /// Signless integer of the given bit width.
    Integer {
        /// Bit width.
        width: u32,
    },
    /// IEEE float of the given bit width.
    Float {
        /// Bit width.
        width: u32,
    },
}

impl TypeKind {
    /// The keyword that introduces this kind in textual form.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Qubit => "qubit",
            TypeKind::Qureg { .. } => "qureg",
            TypeKind::Op => "op",
            TypeKind::COp { .. } => "cop",
            TypeKind::Circ => "circ",
            TypeKind::Index => "index",
            TypeKind::Integer { .. } => "integer",
            TypeKind::Float { .. } => "float",
        }
    }

    /// Whether this kind belongs to the quantum dialect (printed with `!`).
    pub fn is_quantum(&self) -> bool {
        matches!(
            self,
            TypeKind::Qubit
                | TypeKind::Qureg { .. }
                | TypeKind::Op
                | TypeKind::COp { .. }
                | TypeKind::Circ
        )
    }
}

/// Interned, immutable type handle.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Type(pub(crate) Arc<TypeKind>);

impl Type {
    /// The structural kind of this type.
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    pub fn is_qubit(&self) -> bool {
        matches!(self.kind(), TypeKind::Qubit)
    }

    pub fn is_qureg(&self) -> bool {
        matches!(self.kind(), TypeKind::Qureg { .. })
    }

    pub fn is_op(&self) -> bool {
        matches!(self.kind(), TypeKind::Op)
    }

    pub fn is_cop(&self) -> bool {
        matches!(self.kind(), TypeKind::COp { .. })
    }

    pub fn is_circ(&self) -> bool {
        matches!(self.kind(), TypeKind::Circ)
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind(), TypeKind::Index)
    }

    /// Whether this is a dialect type rather than a host type.
    pub fn is_quantum(&self) -> bool {
        self.kind().is_quantum()
    }

    /// Static register size of a `qureg`, `None` for unsized registers and
    /// every other type.
    pub fn num_qubits(&self) -> Option<u32> {
        match self.kind() {
            TypeKind::Qureg { size } => *size,
            _ => None,
        }
    }

    /// Number of controls of a `cop` type.
    pub fn num_controls(&self) -> Option<u32> {
        match self.kind() {
            TypeKind::COp { num_controls, .. } => Some(*num_controls),
            _ => None,
        }
    }

    /// Wrapped base type of a `cop` type, if it names one.
    pub fn base_type(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::COp { base, .. } => base.as_ref(),
            _ => None,
        }
    }

    /// Write the dialect body of a quantum type, without the leading `!`.
    ///
    /// # Panics
    ///
    /// Panics when called on a host type. The printer only routes dialect
    /// kinds here, so reaching the host arm means the type system itself is
    /// inconsistent.
    pub fn write_dialect_body(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self.kind() {
            TypeKind::Qubit => f.write_str("qubit"),
            TypeKind::Qureg { size } => match size {
                Some(n) => write!(f, "qureg<{n}>"),
                None => f.write_str("qureg<>"),
            },
            TypeKind::Op => f.write_str("op"),
            TypeKind::COp { num_controls, base } => {
                write!(f, "cop<{num_controls}")?;
                if let Some(base) = base {
                    f.write_str(", ")?;
                    base.write_dialect_body(f)?;
                }
                f.write_str(">")
            }
            TypeKind::Circ => f.write_str("circ"),
            TypeKind::Index | TypeKind::Integer { .. } | TypeKind::Float { .. } => {
                unreachable!("unrecognized type encountered in the dialect type printer")
            }
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::Index => f.write_str("index"),
            TypeKind::Integer { width } => write!(f, "i{width}"),
            TypeKind::Float { width } => write!(f, "f{width}"),
            _ => {
                f.write_str("!")?;
                self.write_dialect_body(f)
            }
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
