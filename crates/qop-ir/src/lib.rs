//! qop Intermediate Representation
//!
//! This crate provides the core data structures of the `qop` quantum dialect:
//! quantum circuits expressed as SSA data-flow over interned quantum value
//! types, with operations whose register operands may carry sub-range
//! accessors.
//!
//! # Core Components
//!
//! - **Types**: [`TypeRegistry`] interns [`Type`] handles structurally; two
//!   handles are equal exactly when their [`TypeKind`]s are
//! - **Accessors**: [`AccessorTriple`] for optional `[start, size, step]`
//!   sub-ranges whose components are constants or run-time values
//! - **Operations**: [`Operation`] stores a flat operand list plus segment
//!   sizes and accessor arrays; [`OpFamily`] describes each operation's layout
//!
//! # Example: Interning Types
//!
//! ```rust
//! use qop_ir::TypeRegistry;
//!
//! let types = TypeRegistry::new();
//! let a = types.qureg(Some(8)).unwrap();
//! let b = types.qureg(Some(8)).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "!qureg<8>");
//!
//! // Registers hold at least two qubits.
//! assert!(types.qureg(Some(1)).is_err());
//! ```
//!
//! # Example: Building a Gate
//!
//! ```rust
//! use qop_ir::{Accessor, AccessorTriple, LogicalOperand, OpFamily, Operation, TypeRegistry, Value};
//!
//! let types = TypeRegistry::new();
//! let ctrl = Value::new("q0", types.qubit());
//! let target = Value::new("q1", types.qureg(Some(8)).unwrap());
//! let range = AccessorTriple::new(vec![Accessor::Static(2), Accessor::Static(4)]).unwrap();
//!
//! let cx = Operation::gate(
//!     OpFamily::lookup("cx").unwrap(),
//!     None,
//!     vec![LogicalOperand::plain(ctrl), LogicalOperand::register(target, range)],
//!     vec![],
//! )
//! .unwrap();
//!
//! assert_eq!(cx.segment_sizes().unwrap(), &[1, 1, 0]);
//! assert_eq!(cx.logical_operands().unwrap().len(), 2);
//! ```

pub mod accessor;
pub mod attribute;
pub mod error;
pub mod family;
pub mod operation;
pub mod registry;
pub mod types;
pub mod value;

pub use accessor::{Accessor, AccessorTriple, DYNAMIC, MAX_ACCESSORS};
pub use attribute::{AttrDict, Attribute};
pub use error::{IrError, IrResult};
pub use family::{FamilyKind, LeadingParam, OpFamily};
pub use operation::{CallView, LogicalOperand, Operation, ScalarParam};
pub use registry::TypeRegistry;
pub use types::{Type, TypeKind};
pub use value::Value;
