//! SSA value references.

use serde::Serialize;
use std::fmt;

use crate::types::Type;

/// A resolved SSA value: its textual name (without `%`) and its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Value {
    /// Name of the value, e.g. `q0` for `%q0`.
    pub name: String,
    /// Type the value was resolved with.
    pub ty: Type,
}

impl Value {
    /// Create a new value reference.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRegistry;

    #[test]
    fn test_value_display() {
        let reg = TypeRegistry::new();
        let v = Value::new("q0", reg.qubit());
        assert_eq!(format!("{v}"), "%q0");
    }
}
