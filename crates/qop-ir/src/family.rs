//! Operation family descriptors.
//!
//! Each operation mnemonic maps to one static [`OpFamily`] describing its
//! operand layout: which logical operand positions are register-like (and so
//! carry an accessor list), and whether a scalar parameter leads the operand
//! list. Parsing, printing and structural views are all driven by these
//! descriptors rather than by per-operation code.

use serde::Serialize;

/// Attribute holding the per-logical-operand physical slot counts.
pub const OPERAND_SEGMENT_SIZES: &str = "operand_segment_sizes";
/// Attribute holding a compile-time rotation angle.
pub const PHI: &str = "phi";
/// Attribute holding the symbol called by a circuit call.
pub const CALLEE: &str = "callee";
/// Attribute holding the arity literal of a circuit call.
pub const ARITY: &str = "n";

/// Syntactic family of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FamilyKind {
    /// Gate applied to a fixed list of operands.
    FixedGate,
    /// Rotation-style gate with one leading scalar parameter.
    ParametricGate,
    /// Applies a held operation under control qubits.
    ControlledWrapper,
    /// Applies the adjoint of a held operation.
    AdjointWrapper,
    /// Calls a parametric circuit with a variadic argument list.
    CircuitCall,
}

/// What, if anything, precedes the operand list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LeadingParam {
    None,
    /// `(operand)` or `(literal)`.
    Scalar,
}

/// Static operand layout of an operation family.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct OpFamily {
    /// Operation name without namespace.
    pub mnemonic: &'static str,
    pub kind: FamilyKind,
    /// Register-like mask over logical operand positions. Its length is the
    /// maximum arity. Empty for the variadic circuit call.
    pub reg_like: &'static [bool],
    /// Number of leading operands that must be present.
    pub min_arity: usize,
}

const REG: bool = true;
const PLAIN: bool = false;

static FAMILIES: &[OpFamily] = &[
    OpFamily::fixed("h", &[REG]),
    OpFamily::fixed("x", &[REG]),
    OpFamily::fixed("y", &[REG]),
    OpFamily::fixed("z", &[REG]),
    OpFamily::fixed("s", &[REG]),
    OpFamily::fixed("sdg", &[REG]),
    OpFamily::fixed("t", &[REG]),
    OpFamily::fixed("tdg", &[REG]),
    OpFamily::fixed("cx", &[PLAIN, REG]),
    OpFamily::fixed("cz", &[PLAIN, REG]),
    OpFamily::fixed("swap", &[REG, REG]),
    OpFamily::new("rx", FamilyKind::ParametricGate, &[REG]),
    OpFamily::new("ry", FamilyKind::ParametricGate, &[REG]),
    OpFamily::new("rz", FamilyKind::ParametricGate, &[REG]),
    // held op, controls, targets
    OpFamily::new("cop", FamilyKind::ControlledWrapper, &[PLAIN, REG, REG]).requires(2),
    // held op, optional target
    OpFamily::new("adj", FamilyKind::AdjointWrapper, &[PLAIN, REG]).requires(1),
    OpFamily::new("circ", FamilyKind::CircuitCall, &[]),
];

impl OpFamily {
    const fn new(mnemonic: &'static str, kind: FamilyKind, reg_like: &'static [bool]) -> Self {
        Self {
            mnemonic,
            kind,
            reg_like,
            min_arity: 0,
        }
    }

    const fn requires(mut self, min_arity: usize) -> Self {
        self.min_arity = min_arity;
        self
    }

    const fn fixed(mnemonic: &'static str, reg_like: &'static [bool]) -> Self {
        Self::new(mnemonic, FamilyKind::FixedGate, reg_like)
    }

    /// Look up the family for a mnemonic.
    pub fn lookup(mnemonic: &str) -> Option<&'static OpFamily> {
        FAMILIES.iter().find(|f| f.mnemonic == mnemonic)
    }

    /// All known families.
    pub fn all() -> &'static [OpFamily] {
        FAMILIES
    }

    pub fn leading(&self) -> LeadingParam {
        match self.kind {
            FamilyKind::ParametricGate => LeadingParam::Scalar,
            _ => LeadingParam::None,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == FamilyKind::CircuitCall
    }

    /// Maximum number of logical operands.
    pub fn arity(&self) -> usize {
        self.reg_like.len()
    }

    pub fn num_reg_like(&self) -> usize {
        self.reg_like.iter().filter(|&&r| r).count()
    }

    /// Length of the segment size vector of a masked family: one slot for a
    /// leading scalar, one per logical operand, one per accessor list.
    pub fn segment_sizes_len(&self) -> usize {
        usize::from(self.leading() == LeadingParam::Scalar) + self.arity() + self.num_reg_like()
    }

    /// Attribute name of the `index`-th register-like operand's accessors.
    pub fn accessor_attr_name(index: usize) -> String {
        format!("accessor_{index}")
    }

    /// Whether `name` is managed by the operand codec and hidden from the
    /// printed attribute dictionary.
    pub fn is_reserved_attr(&self, name: &str) -> bool {
        if name == OPERAND_SEGMENT_SIZES {
            return true;
        }
        let num_accessor_attrs = if self.is_variadic() { 1 } else { self.num_reg_like() };
        if let Some(index) = name.strip_prefix("accessor_") {
            return index
                .parse::<usize>()
                .is_ok_and(|i| i < num_accessor_attrs && Self::accessor_attr_name(i) == name);
        }
        match self.kind {
            FamilyKind::ParametricGate => name == PHI,
            FamilyKind::CircuitCall => name == CALLEE || name == ARITY,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let cx = OpFamily::lookup("cx").unwrap();
        assert_eq!(cx.kind, FamilyKind::FixedGate);
        assert_eq!(cx.arity(), 2);
        assert_eq!(cx.num_reg_like(), 1);
        assert_eq!(cx.segment_sizes_len(), 3);
        assert!(OpFamily::lookup("toffoli").is_none());
    }

    #[test]
    fn test_wrappers_require_held_op() {
        assert_eq!(OpFamily::lookup("cop").unwrap().min_arity, 2);
        assert_eq!(OpFamily::lookup("adj").unwrap().min_arity, 1);
        assert_eq!(OpFamily::lookup("h").unwrap().min_arity, 0);
        assert!(
            OpFamily::all()
                .iter()
                .all(|f| f.min_arity <= f.arity() || f.is_variadic())
        );
    }

    #[test]
    fn test_parametric_layout() {
        let rz = OpFamily::lookup("rz").unwrap();
        assert_eq!(rz.leading(), LeadingParam::Scalar);
        assert_eq!(rz.segment_sizes_len(), 3);
        assert!(rz.is_reserved_attr("phi"));
        assert!(!OpFamily::lookup("h").unwrap().is_reserved_attr("phi"));
    }

    #[test]
    fn test_reserved_accessor_names() {
        let cop = OpFamily::lookup("cop").unwrap();
        assert!(cop.is_reserved_attr("accessor_0"));
        assert!(cop.is_reserved_attr("accessor_1"));
        assert!(!cop.is_reserved_attr("accessor_2"));
        assert!(!cop.is_reserved_attr("accessor_01"));
        assert!(cop.is_reserved_attr(OPERAND_SEGMENT_SIZES));

        let call = OpFamily::lookup("circ").unwrap();
        assert!(call.is_variadic());
        assert!(call.is_reserved_attr("callee"));
        assert!(call.is_reserved_attr("accessor_0"));
        assert!(!call.is_reserved_attr("accessor_1"));
    }

    #[test]
    fn test_mnemonics_are_unique() {
        let mut names: Vec<_> = OpFamily::all().iter().map(|f| f.mnemonic).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OpFamily::all().len());
    }
}
