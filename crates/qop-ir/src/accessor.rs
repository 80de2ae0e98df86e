//! Register accessors: optional `[start, size, step]` sub-ranges.
//!
//! An accessor component is either a compile-time integer or a run-time value.
//! On an operation the components are stored as a static `i64` array in which
//! run-time slots hold the [`DYNAMIC`] sentinel, while the run-time values
//! themselves live in the flat operand list, in the same positional order.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::value::Value;

/// Sentinel marking a run-time accessor slot in a static accessor array.
pub const DYNAMIC: i64 = i64::MIN;

/// Maximum number of accessor components: start, size and step.
pub const MAX_ACCESSORS: usize = 3;

/// One accessor component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Accessor<V = Value> {
    /// A compile-time constant.
    Static(i64),
    /// A run-time value.
    Dynamic(V),
}

impl<V> Accessor<V> {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Accessor::Dynamic(_))
    }
}

/// Up to three accessor components. Empty means the whole register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccessorTriple<V = Value> {
    components: Vec<Accessor<V>>,
}

impl<V> Default for AccessorTriple<V> {
    fn default() -> Self {
        Self { components: vec![] }
    }
}

impl<V> AccessorTriple<V> {
    /// Build a triple from at most three components.
    pub fn new(components: Vec<Accessor<V>>) -> IrResult<Self> {
        if components.len() > MAX_ACCESSORS {
            return Err(IrError::TooManyAccessors(components.len()));
        }
        Ok(Self { components })
    }

    /// The whole-register accessor.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<&Accessor<V>> {
        self.components.first()
    }

    pub fn size(&self) -> Option<&Accessor<V>> {
        self.components.get(1)
    }

    pub fn step(&self) -> Option<&Accessor<V>> {
        self.components.get(2)
    }

    pub fn components(&self) -> &[Accessor<V>] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components that are run-time values.
    pub fn num_dynamic(&self) -> usize {
        self.components.iter().filter(|c| c.is_dynamic()).count()
    }

    /// Split into the static array (with [`DYNAMIC`] sentinels) and the
    /// run-time values in positional order.
    pub fn encode(self) -> (Vec<i64>, Vec<V>) {
        let mut statics = Vec::with_capacity(self.components.len());
        let mut dynamics = Vec::new();
        for component in self.components {
            match component {
                Accessor::Static(v) => statics.push(v),
                Accessor::Dynamic(value) => {
                    statics.push(DYNAMIC);
                    dynamics.push(value);
                }
            }
        }
        (statics, dynamics)
    }

    /// Rebuild a triple from its static array, pulling one run-time value
    /// from `dynamics` for every sentinel.
    pub fn decode(statics: &[i64], dynamics: &mut impl Iterator<Item = V>) -> IrResult<Self> {
        let components = statics
            .iter()
            .map(|&v| {
                if v == DYNAMIC {
                    dynamics
                        .next()
                        .map(Accessor::Dynamic)
                        .ok_or_else(|| IrError::malformed("missing run-time accessor operand"))
                } else {
                    Ok(Accessor::Static(v))
                }
            })
            .collect::<IrResult<Vec<_>>>()?;
        Self::new(components)
    }

    /// Convert every run-time component.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> AccessorTriple<U> {
        let components = self
            .components
            .into_iter()
            .map(|c| match c {
                Accessor::Static(v) => Accessor::Static(v),
                Accessor::Dynamic(v) => Accessor::Dynamic(f(v)),
            })
            .collect();
        AccessorTriple { components }
    }

    /// Convert every run-time component, failing on the first error.
    pub fn try_map<U, E>(self, mut f: impl FnMut(V) -> Result<U, E>) -> Result<AccessorTriple<U>, E> {
        let components = self
            .components
            .into_iter()
            .map(|c| match c {
                Accessor::Static(v) => Ok(Accessor::Static(v)),
                Accessor::Dynamic(v) => f(v).map(Accessor::Dynamic),
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(AccessorTriple { components })
    }
}
