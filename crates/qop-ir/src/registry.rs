//! Structural interning of types.

use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::types::{Type, TypeKind};

/// Float widths the host layer knows how to print and parse.
const FLOAT_WIDTHS: [u32; 3] = [16, 32, 64];

/// Largest supported integer width.
const MAX_INTEGER_WIDTH: u32 = 128;

/// Interning table for [`Type`] handles.
///
/// Lookups take a shared read lock; a miss takes the registry-wide write lock,
/// re-checks, and inserts. Handles are never removed, so a handle stays valid
/// and immutable for the lifetime of the registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    table: RwLock<FxHashMap<TypeKind, Type>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `kind` and return its interned handle.
    pub fn get(&self, kind: TypeKind) -> IrResult<Type> {
        validate(&kind)?;
        Ok(self.intern(kind))
    }

    /// The `qubit` type.
    pub fn qubit(&self) -> Type {
        self.intern(TypeKind::Qubit)
    }

    /// A `qureg` type; `size`, when given, must be greater than 1.
    pub fn qureg(&self, size: Option<i64>) -> IrResult<Type> {
        let size = match size {
            None => None,
            Some(n) if n > 1 => Some(u32::try_from(n).map_err(|_| {
                IrError::invalid_param("qureg", format!("register size {n} is too large"))
            })?),
            Some(n) => {
                return Err(IrError::invalid_param(
                    "qureg",
                    format!("register size must be > 1, got {n}"),
                ));
            }
        };
        self.get(TypeKind::Qureg { size })
    }

    /// The `op` type.
    pub fn op(&self) -> Type {
        self.intern(TypeKind::Op)
    }

    /// A `cop` type with `num_controls > 0` and an optional `op`/`circ` base.
    pub fn cop(&self, num_controls: i64, base: Option<Type>) -> IrResult<Type> {
        if num_controls <= 0 {
            return Err(IrError::invalid_param(
                "cop",
                format!("number of controls must be > 0, got {num_controls}"),
            ));
        }
        let num_controls = u32::try_from(num_controls).map_err(|_| {
            IrError::invalid_param(
                "cop",
                format!("number of controls {num_controls} is too large"),
            )
        })?;
        self.get(TypeKind::COp { num_controls, base })
    }

    /// The `circ` type.
    pub fn circ(&self) -> Type {
        self.intern(TypeKind::Circ)
    }

    /// The host `index` type.
    pub fn index(&self) -> Type {
        self.intern(TypeKind::Index)
    }

    /// A signless integer type `iN`.
    pub fn integer(&self, width: u32) -> IrResult<Type> {
        self.get(TypeKind::Integer { width })
    }

    /// A float type `fN`.
    pub fn float(&self, width: u32) -> IrResult<Type> {
        self.get(TypeKind::Float { width })
    }

    /// Number of distinct types interned so far.
    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if no type has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn intern(&self, kind: TypeKind) -> Type {
        {
            let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ty) = table.get(&kind) {
                return ty.clone();
            }
        }

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have inserted between the two locks.
        table
            .entry(kind)
            .or_insert_with_key(|kind| {
                debug!("Interning new type: {}", kind.keyword());
                Type(Arc::new(kind.clone()))
            })
            .clone()
    }
}

fn validate(kind: &TypeKind) -> IrResult<()> {
    match kind {
        TypeKind::Qureg { size: Some(n) } if *n <= 1 => Err(IrError::invalid_param(
            "qureg",
            format!("register size must be > 1, got {n}"),
        )),
        TypeKind::COp { num_controls, base } => {
            if *num_controls == 0 {
                return Err(IrError::invalid_param(
                    "cop",
                    "number of controls must be > 0, got 0",
                ));
            }
            match base {
                Some(base) if !(base.is_op() || base.is_circ()) => Err(IrError::invalid_param(
                    "cop",
                    format!("base type must be 'op' or 'circ', got '{base}'"),
                )),
                _ => Ok(()),
            }
        }
        TypeKind::Integer { width } if *width == 0 || *width > MAX_INTEGER_WIDTH => Err(
            IrError::invalid_param("integer", format!("unsupported width {width}")),
        ),
        TypeKind::Float { width } if !FLOAT_WIDTHS.contains(width) => Err(
            IrError::invalid_param("float", format!("unsupported width {width}")),
        ),
        _ => Ok(()),
    }
}
