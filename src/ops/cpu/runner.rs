//! CPU implementation of the operator runner.

use crate::error::{Error, Result};
use crate::ops::registry::{OperatorKind, op_def};
use crate::ops::{InputOperands, OpAttrs, OperatorRunner, OutputOperands};
use crate::runtime::cpu::{
    CpuClient, CpuRuntime,
    helpers::{add_impl, sum_impl},
};
use crate::tensor::Tensor;

fn input_role<'a>(
    inputs: &InputOperands<'a, CpuRuntime>,
    role: &str,
) -> Result<Vec<&'a Tensor<CpuRuntime>>> {
    inputs
        .role(role)
        .map(|operands| operands.iter().map(|o| *o.tensor()).collect())
        .ok_or_else(|| Error::Internal(format!("role {role} missing after validation")))
}

fn output_slot<'m>(
    outputs: &'m mut OutputOperands<'_, CpuRuntime>,
    role: &str,
) -> Result<&'m mut Tensor<CpuRuntime>> {
    let operand = outputs
        .role_mut(role)
        .and_then(|operands| operands.first_mut())
        .ok_or_else(|| Error::Internal(format!("role {role} missing after validation")))?;
    Ok(&mut **operand.tensor_mut())
}

impl OperatorRunner<CpuRuntime> for CpuClient {
    fn run_operator(
        &self,
        op: &str,
        inputs: &InputOperands<'_, CpuRuntime>,
        outputs: &mut OutputOperands<'_, CpuRuntime>,
        attrs: &OpAttrs,
    ) -> Result<()> {
        let def = op_def(op)?;
        def.validate(inputs, outputs, attrs)?;
        log::debug!("run_operator: {} resolved as {:?}", def.name, def.kind);

        let out = output_slot(outputs, def.outputs[0].name)?;
        match def.kind {
            OperatorKind::Sum => {
                let xs = input_role(inputs, def.inputs[0].name)?;
                sum_impl(self, &xs, out)
            }
            OperatorKind::ElementwiseAdd => {
                let x = input_role(inputs, def.inputs[0].name)?;
                let y = input_role(inputs, def.inputs[1].name)?;
                *out = add_impl(self, x[0], y[0])?;
                Ok(())
            }
        }
    }
}
