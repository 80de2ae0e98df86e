//! Operations with register-access operand lists.
//!
//! An [`Operation`] stores its operands as one flat list. Structure is kept in
//! two side tables: the `operand_segment_sizes` vector, recording how many
//! flat slots each logical operand and each accessor list consumes, and one
//! static accessor array per register-like position. The builders encode a
//! logical operand list into that form, and the views decode it again without
//! any textual re-parsing.

use serde::Serialize;

use crate::accessor::AccessorTriple;
use crate::attribute::{AttrDict, Attribute};
use crate::error::{IrError, IrResult};
use crate::family::{ARITY, CALLEE, LeadingParam, OPERAND_SEGMENT_SIZES, OpFamily, PHI};
use crate::types::Type;
use crate::value::Value;

/// Leading scalar of a parametric gate: a run-time operand or a constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScalarParam {
    /// Angle supplied as an SSA value, e.g. `rz(%phi)`.
    RuntimeOperand(Value),
    /// Angle stored as the `phi` attribute, e.g. `rz(0.5)`.
    CompileTimeConstant(f64),
}

/// One logical operand: its primary value and, for register-like positions,
/// its accessor triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalOperand {
    pub value: Value,
    pub accessor: Option<AccessorTriple>,
}

impl LogicalOperand {
    /// An operand in a position that is not register-like.
    pub fn plain(value: Value) -> Self {
        Self {
            value,
            accessor: None,
        }
    }

    /// An operand in a register-like position.
    pub fn register(value: Value, accessor: AccessorTriple) -> Self {
        Self {
            value,
            accessor: Some(accessor),
        }
    }

    pub fn is_register_like(&self) -> bool {
        self.accessor.is_some()
    }
}

/// Decoded operands of a circuit call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallView<'a> {
    pub callee: &'a str,
    /// The arity literal.
    pub n: i64,
    /// Call arguments with their accessors.
    pub args: Vec<LogicalOperand>,
    /// Run-time accessor operands, in order, following the arguments.
    pub ranges: &'a [Value],
}

/// A single operation instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub family: &'static OpFamily,
    /// Flat operand list: leading scalar, then each logical operand followed
    /// by its run-time accessors. Circuit calls place all accessors last.
    pub operands: Vec<Value>,
    pub attributes: AttrDict,
    pub result_types: Vec<Type>,
}

impl Operation {
    /// Build a gate-like operation from its logical operands.
    ///
    /// `operands` may be shorter than the family's arity; register-like
    /// positions that are not supplied still get an empty accessor array.
    pub fn gate(
        family: &'static OpFamily,
        scalar: Option<ScalarParam>,
        operands: Vec<LogicalOperand>,
        result_types: Vec<Type>,
    ) -> IrResult<Self> {
        if family.is_variadic() {
            return Err(IrError::malformed(format!(
                "'{}' is a circuit call, not a gate",
                family.mnemonic
            )));
        }
        if operands.len() > family.arity() {
            return Err(IrError::malformed(format!(
                "'{}' takes at most {} operands, got {}",
                family.mnemonic,
                family.arity(),
                operands.len()
            )));
        }
        if operands.len() < family.min_arity {
            return Err(IrError::malformed(format!(
                "'{}' takes at least {} operands, got {}",
                family.mnemonic,
                family.min_arity,
                operands.len()
            )));
        }

        let mut flat = Vec::new();
        let mut segments = Vec::with_capacity(family.segment_sizes_len());
        let mut attributes = AttrDict::new();

        match (family.leading(), scalar) {
            (LeadingParam::Scalar, Some(ScalarParam::RuntimeOperand(value))) => {
                flat.push(value);
                segments.push(1);
            }
            (LeadingParam::Scalar, Some(ScalarParam::CompileTimeConstant(phi))) => {
                attributes.insert(PHI, Attribute::Float(phi));
                segments.push(0);
            }
            (LeadingParam::Scalar, None) => {
                return Err(IrError::malformed(format!(
                    "'{}' requires a scalar parameter",
                    family.mnemonic
                )));
            }
            (LeadingParam::None, Some(_)) => {
                return Err(IrError::malformed(format!(
                    "'{}' takes no scalar parameter",
                    family.mnemonic
                )));
            }
            (LeadingParam::None, None) => {}
        }

        let mut operands = operands.into_iter();
        let mut reg_index = 0;
        for (position, &is_reg) in family.reg_like.iter().enumerate() {
            let Some(LogicalOperand { value, accessor }) = operands.next() else {
                segments.push(0);
                if is_reg {
                    segments.push(0);
                    let name = OpFamily::accessor_attr_name(reg_index);
                    attributes.insert(name, Attribute::I64Array(vec![]));
                    reg_index += 1;
                }
                continue;
            };

            flat.push(value);
            segments.push(1);
            match (is_reg, accessor) {
                (true, Some(accessor)) => {
                    let (statics, dynamics) = accessor.encode();
                    segments.push(segment_len(dynamics.len())?);
                    flat.extend(dynamics);
                    let name = OpFamily::accessor_attr_name(reg_index);
                    attributes.insert(name, Attribute::I64Array(statics));
                    reg_index += 1;
                }
                (false, Some(_)) => {
                    return Err(IrError::malformed(format!(
                        "operand {position} of '{}' is not register-like",
                        family.mnemonic
                    )));
                }
                (true, None) => {
                    return Err(IrError::malformed(format!(
                        "operand {position} of '{}' is register-like and needs an accessor",
                        family.mnemonic
                    )));
                }
                (false, None) => {}
            }
        }

        attributes.insert(OPERAND_SEGMENT_SIZES, Attribute::I32Vector(segments));
        Ok(Self {
            family,
            operands: flat,
            attributes,
            result_types,
        })
    }

    /// Build a circuit call `@callee(n, args...) -> result`.
    pub fn circuit_call(
        callee: impl Into<String>,
        n: i64,
        args: Vec<(Value, AccessorTriple)>,
        result: Type,
    ) -> IrResult<Self> {
        let family = OpFamily::lookup("circ")
            .ok_or_else(|| IrError::malformed("circuit call family is not registered"))?;

        let mut flat = Vec::with_capacity(args.len());
        let mut ranges = Vec::new();
        let mut accessor_arrays = Vec::with_capacity(args.len());
        for (value, accessor) in args {
            let (statics, dynamics) = accessor.encode();
            flat.push(value);
            ranges.extend(dynamics);
            accessor_arrays.push(Attribute::I64Array(statics));
        }
        let segments = vec![segment_len(flat.len())?, segment_len(ranges.len())?];
        flat.extend(ranges);

        let mut attributes = AttrDict::new();
        attributes.insert(CALLEE, Attribute::SymbolRef(callee.into()));
        attributes.insert(ARITY, Attribute::Integer(n));
        attributes.insert(OpFamily::accessor_attr_name(0), Attribute::Array(accessor_arrays));
        attributes.insert(OPERAND_SEGMENT_SIZES, Attribute::I32Vector(segments));

        Ok(Self {
            family,
            operands: flat,
            attributes,
            result_types: vec![result],
        })
    }

    /// The stored segment size vector.
    pub fn segment_sizes(&self) -> IrResult<&[i32]> {
        self.attributes
            .get(OPERAND_SEGMENT_SIZES)
            .and_then(Attribute::as_i32_vector)
            .ok_or_else(|| IrError::malformed(format!("missing '{OPERAND_SEGMENT_SIZES}'")))
    }

    /// The leading scalar of a parametric gate, `None` for other families.
    pub fn scalar_param(&self) -> IrResult<Option<ScalarParam>> {
        if self.family.leading() != LeadingParam::Scalar {
            return Ok(None);
        }
        let runtime = self.segment_sizes()?.first().copied().unwrap_or(0);
        let literal = self.attributes.get(PHI);
        match (runtime, literal) {
            (1, None) => self
                .operands
                .first()
                .cloned()
                .map(|v| Some(ScalarParam::RuntimeOperand(v)))
                .ok_or_else(|| IrError::malformed("missing scalar operand")),
            (0, Some(attr)) => attr
                .as_float()
                .map(|phi| Some(ScalarParam::CompileTimeConstant(phi)))
                .ok_or_else(|| IrError::malformed(format!("'{PHI}' must be a float"))),
            _ => Err(IrError::malformed(
                "scalar parameter must be exactly one of operand or constant",
            )),
        }
    }

    /// Reconstruct the logical operand list from the flat operands.
    pub fn logical_operands(&self) -> IrResult<Vec<LogicalOperand>> {
        if self.family.is_variadic() {
            return Ok(self.as_call()?.args);
        }

        let segments = self.segment_sizes()?;
        if segments.len() != self.family.segment_sizes_len() {
            return Err(IrError::malformed(format!(
                "expected {} segment sizes, found {}",
                self.family.segment_sizes_len(),
                segments.len()
            )));
        }

        let mut segments = segments.iter().map(|&s| usize::try_from(s));
        let mut next_segment = || match segments.next() {
            Some(Ok(size)) => Ok(size),
            _ => Err(IrError::malformed("invalid segment size")),
        };

        let mut cursor = 0;
        if self.family.leading() == LeadingParam::Scalar {
            cursor += next_segment()?;
        }

        let mut logical = Vec::new();
        let mut reg_index = 0;
        let mut ended = false;
        for &is_reg in self.family.reg_like {
            let primary = next_segment()?;
            let accessors = if is_reg { next_segment()? } else { 0 };
            let statics = if is_reg {
                reg_index += 1;
                Some(self.accessor_array(reg_index - 1)?)
            } else {
                None
            };

            match primary {
                0 => {
                    ended = true;
                    if accessors != 0 || statics.is_some_and(|s| !s.is_empty()) {
                        return Err(IrError::malformed("accessors on an absent operand"));
                    }
                }
                1 if !ended => {
                    let value = self.operand_at(cursor)?.clone();
                    cursor += 1;
                    let accessor = match statics {
                        Some(statics) => {
                            let dynamics = self
                                .operands
                                .get(cursor..cursor + accessors)
                                .ok_or_else(|| IrError::malformed("accessor operands missing"))?;
                            cursor += accessors;
                            let triple =
                                AccessorTriple::decode(statics, &mut dynamics.iter().cloned())?;
                            if triple.num_dynamic() != accessors {
                                return Err(IrError::malformed(
                                    "accessor segment disagrees with accessor array",
                                ));
                            }
                            Some(triple)
                        }
                        None => None,
                    };
                    logical.push(LogicalOperand { value, accessor });
                }
                _ => return Err(IrError::malformed("non-contiguous operand segments")),
            }
        }

        if cursor != self.operands.len() {
            return Err(IrError::malformed(format!(
                "{} trailing operands not covered by segments",
                self.operands.len() - cursor
            )));
        }
        Ok(logical)
    }

    /// Decode a circuit call.
    pub fn as_call(&self) -> IrResult<CallView<'_>> {
        if !self.family.is_variadic() {
            return Err(IrError::malformed(format!(
                "'{}' is not a circuit call",
                self.family.mnemonic
            )));
        }
        let callee = self
            .attributes
            .get(CALLEE)
            .and_then(Attribute::as_symbol)
            .ok_or_else(|| IrError::malformed(format!("missing '{CALLEE}'")))?;
        let n = self
            .attributes
            .get(ARITY)
            .and_then(Attribute::as_integer)
            .ok_or_else(|| IrError::malformed(format!("missing '{ARITY}'")))?;

        let (num_args, num_ranges) = match self.segment_sizes()? {
            &[args, ranges] => (
                usize::try_from(args).map_err(|_| IrError::malformed("invalid segment size"))?,
                usize::try_from(ranges).map_err(|_| IrError::malformed("invalid segment size"))?,
            ),
            other => {
                return Err(IrError::malformed(format!(
                    "expected 2 segment sizes, found {}",
                    other.len()
                )));
            }
        };
        if num_args + num_ranges != self.operands.len() {
            return Err(IrError::malformed("segment sizes do not cover the operands"));
        }

        let arrays = self
            .attributes
            .get(&OpFamily::accessor_attr_name(0))
            .and_then(Attribute::as_array)
            .ok_or_else(|| IrError::malformed("missing call accessor array"))?;
        if arrays.len() != num_args {
            return Err(IrError::malformed(
                "one accessor array per call argument is required",
            ));
        }

        let (values, ranges) = self.operands.split_at(num_args);
        let mut dynamics = ranges.iter().cloned();
        let args = values
            .iter()
            .zip(arrays)
            .map(|(value, statics)| {
                let statics = statics
                    .as_i64_array()
                    .ok_or_else(|| IrError::malformed("call accessor must be an i64 array"))?;
                let triple = AccessorTriple::decode(statics, &mut dynamics)?;
                Ok(LogicalOperand::register(value.clone(), triple))
            })
            .collect::<IrResult<Vec<_>>>()?;
        if dynamics.next().is_some() {
            return Err(IrError::malformed("unused run-time accessor operands"));
        }

        Ok(CallView {
            callee,
            n,
            args,
            ranges,
        })
    }

    /// User attributes: everything not managed by the operand codec.
    pub fn user_attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes
            .iter()
            .filter(|(name, _)| !self.family.is_reserved_attr(name))
    }

    fn accessor_array(&self, reg_index: usize) -> IrResult<&[i64]> {
        let name = OpFamily::accessor_attr_name(reg_index);
        self.attributes
            .get(&name)
            .and_then(Attribute::as_i64_array)
            .ok_or_else(|| IrError::malformed(format!("missing '{name}'")))
    }

    fn operand_at(&self, index: usize) -> IrResult<&Value> {
        self.operands
            .get(index)
            .ok_or_else(|| IrError::malformed(format!("operand {index} out of range")))
    }
}

fn segment_len(len: usize) -> IrResult<i32> {
    i32::try_from(len).map_err(|_| IrError::malformed("segment size exceeds i32::MAX"))
}
