//! Printer for qop assembly.
//!
//! The printer works from the structural views on [`Operation`], so anything
//! the parser produced prints back in canonical form: single spaces, `, `
//! between operands, reserved attributes elided and accessor types omitted.

use qop_ir::{
    Accessor, AccessorTriple, Attribute, IrError, IrResult, Operation, ScalarParam, Type,
};

use crate::config::AsmConfig;

/// Serializes operations and types.
#[derive(Debug, Clone, Copy)]
pub struct Printer<'c> {
    config: &'c AsmConfig,
}

impl<'c> Printer<'c> {
    pub fn new(config: &'c AsmConfig) -> Self {
        Self { config }
    }

    /// Print a standalone type: the dialect body without `!` for quantum
    /// types, the plain name for host types.
    pub fn print_type(&self, ty: &Type) -> String {
        ty.to_string().trim_start_matches('!').to_string()
    }

    /// Print one operation.
    ///
    /// Fails only if the operation's flat operands disagree with its segment
    /// sizes or accessor attributes.
    pub fn print_operation(&self, op: &Operation) -> IrResult<String> {
        let mut out = self.config.op_name(op.family.mnemonic);
        if op.family.is_variadic() {
            self.emit_call(&mut out, op)?;
        } else {
            self.emit_gate(&mut out, op)?;
        }
        Ok(out)
    }

    /// Print operations one per line.
    pub fn print_operations(&self, ops: &[Operation]) -> IrResult<String> {
        let mut out = String::new();
        for op in ops {
            out.push_str(&self.print_operation(op)?);
            out.push('\n');
        }
        Ok(out)
    }

    fn emit_gate(&self, out: &mut String, op: &Operation) -> IrResult<()> {
        let mut operand_types = Vec::new();
        match op.scalar_param()? {
            Some(ScalarParam::RuntimeOperand(value)) => {
                out.push_str(&format!("({value})"));
                operand_types.push(value.ty);
            }
            Some(ScalarParam::CompileTimeConstant(phi)) => {
                out.push_str(&format!("({})", Attribute::Float(phi)));
            }
            None => {}
        }

        for (i, operand) in op.logical_operands()?.into_iter().enumerate() {
            out.push_str(if i == 0 { " " } else { ", " });
            out.push_str(&operand.value.to_string());
            if let Some(accessor) = &operand.accessor {
                self.emit_accessor(out, accessor);
            }
            operand_types.push(operand.value.ty);
        }

        emit_attr_dict(out, op);
        emit_type_list(out, " : ", &operand_types);
        emit_type_list(out, " -> ", &op.result_types);
        Ok(())
    }

    fn emit_call(&self, out: &mut String, op: &Operation) -> IrResult<()> {
        let call = op.as_call()?;
        let [result] = op.result_types.as_slice() else {
            return Err(IrError::MalformedOperation(format!(
                "circuit call must have exactly one result, found {}",
                op.result_types.len()
            )));
        };

        out.push_str(&format!(" @{}({}", call.callee, call.n));
        let mut operand_types = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            out.push_str(&format!(", {}", arg.value));
            if let Some(accessor) = &arg.accessor {
                self.emit_accessor(out, accessor);
            }
            operand_types.push(arg.value.ty.clone());
        }
        out.push(')');

        emit_attr_dict(out, op);
        emit_type_list(out, " : ", &operand_types);
        out.push_str(&format!(" -> {result}"));
        Ok(())
    }

    fn emit_accessor(&self, out: &mut String, accessor: &AccessorTriple) {
        if accessor.is_empty() {
            return;
        }
        let parts: Vec<String> = accessor
            .components()
            .iter()
            .map(|c| match c {
                Accessor::Static(v) => v.to_string(),
                Accessor::Dynamic(value) => value.to_string(),
            })
            .collect();
        out.push('[');
        out.push_str(&parts.join(self.config.accessor_style.separator()));
        out.push(']');
    }
}

fn emit_attr_dict(out: &mut String, op: &Operation) {
    let entries: Vec<String> = op
        .user_attributes()
        .map(|(name, value)| match value {
            Attribute::Unit => name.to_string(),
            value => format!("{name} = {value}"),
        })
        .collect();
    if !entries.is_empty() {
        out.push_str(&format!(" {{{}}}", entries.join(", ")));
    }
}

fn emit_type_list(out: &mut String, prefix: &str, types: &[Type]) {
    if types.is_empty() {
        return;
    }
    let names: Vec<String> = types.iter().map(ToString::to_string).collect();
    out.push_str(prefix);
    out.push_str(&names.join(", "));
}
