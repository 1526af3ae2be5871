//! Generic operator runner trait.

use crate::error::Result;
use crate::ops::{InputOperands, OpAttrs, OutputOperands};
use crate::runtime::Runtime;

/// Executes registered operators by name on named operands.
///
/// The runner looks `op` up in its operator table, validates the operand roles,
/// slot names and attributes against the operator's definition, then computes
/// the result and rebinds every output slot to a freshly allocated tensor.
///
/// # Example
///
/// ```
/// use addn::prelude::*;
///
/// let device = CpuDevice::new();
/// let client = CpuRuntime::default_client(&device);
/// let a = Tensor::<CpuRuntime>::from_slice(&[1i32, 2], &[2], &device);
/// let b = Tensor::<CpuRuntime>::from_slice(&[3i32, 4], &[2], &device);
/// let mut out = Tensor::<CpuRuntime>::empty(&[0], DType::I32, &device);
///
/// let mut inputs: InputOperands<'_, CpuRuntime> = OperandMap::new();
/// inputs.bind("X", "x_0", &a).bind("X", "x_1", &b);
/// let mut outputs: OutputOperands<'_, CpuRuntime> = OperandMap::new();
/// outputs.bind("Out", "out", &mut out);
///
/// client.run_operator("sum", &inputs, &mut outputs, &OpAttrs::new())?;
/// drop(outputs);
/// assert_eq!(out.to_vec::<i32>(), [4, 6]);
/// # Ok::<(), addn::error::Error>(())
/// ```
pub trait OperatorRunner<R: Runtime> {
    /// Run operator `op` on the given operands
    ///
    /// # Errors
    ///
    /// - `Error::UnknownOperator` if no operator is registered under `op`
    /// - `Error::OperandMismatch` if roles or slots disagree with the definition
    /// - `Error::InvalidArgument` for attributes the operator does not accept
    /// - Any error of the operator's kernel (dtype, shape, device, allocation)
    fn run_operator(
        &self,
        op: &str,
        inputs: &InputOperands<'_, R>,
        outputs: &mut OutputOperands<'_, R>,
        attrs: &OpAttrs,
    ) -> Result<()>;
}
