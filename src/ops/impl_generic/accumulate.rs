//! Generic N-ary accumulation
//!
//! Both strategies are written against the ops traits only, so any backend
//! whose client implements them gets `add_n` by delegating here.

use crate::config::{AccumulateStrategy, KernelConfig};
use crate::error::{Error, Result};
use crate::ops::registry::SlotNaming;
use crate::ops::{
    BinaryOps, InputOperands, MemoryOps, OpAttrs, OperandMap, OperatorRunner, OutputOperands,
};
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;

const SUM_OP: &str = "sum";
const INPUT_ROLE: &str = "X";
const INPUT_SLOTS: SlotNaming = SlotNaming::Indexed("x");
const OUTPUT_ROLE: &str = "Out";
const OUTPUT_SLOT: &str = "out";

/// Sum `inputs` into `out` with the strategy chosen by `config`
pub fn add_n_impl<R, C>(
    client: &C,
    inputs: &[&Tensor<R>],
    out: &mut Tensor<R>,
    config: &KernelConfig,
) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R> + BinaryOps<R> + MemoryOps<R> + OperatorRunner<R>,
{
    let first = inputs.first().ok_or_else(|| Error::InvalidArgument {
        arg: "inputs",
        reason: "add_n requires at least one input".to_string(),
    })?;

    let strategy = config.strategy();
    log::debug!(
        "add_n: {} strategy, {} inputs of {:?} {}",
        strategy,
        inputs.len(),
        first.shape(),
        first.dtype()
    );

    match strategy {
        AccumulateStrategy::PairwiseReduction => pairwise_reduce(client, inputs, out),
        AccumulateStrategy::FusedDispatch => fused_dispatch(client, inputs, out),
    }
}

/// Sum `inputs` into a newly created tensor
pub fn sum_n_impl<R, C>(
    client: &C,
    inputs: &[&Tensor<R>],
    config: &KernelConfig,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R> + BinaryOps<R> + MemoryOps<R> + OperatorRunner<R>,
{
    let first = inputs.first().ok_or_else(|| Error::InvalidArgument {
        arg: "inputs",
        reason: "sum_n requires at least one input".to_string(),
    })?;

    // Zero-sized placeholder; add_n replaces it.
    let mut out = Tensor::<R>::try_alloc(client, &[0], first.dtype())?;
    add_n_impl(client, inputs, &mut out, config)?;
    Ok(out)
}

/// Left-to-right chain of binary adds
///
/// Each step after the first writes into a brand-new buffer; the buffer it
/// replaces is the step's right operand and is dropped when the step ends.
fn pairwise_reduce<R, C>(client: &C, inputs: &[&Tensor<R>], out: &mut Tensor<R>) -> Result<()>
where
    R: Runtime,
    C: RuntimeClient<R> + BinaryOps<R> + MemoryOps<R>,
{
    let (first, rest) = match inputs.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    *out = Tensor::<R>::try_alloc(client, first.shape(), first.dtype())?;

    let (second, rest) = match rest.split_first() {
        Some(split) => split,
        None => return client.copy_into(first, out),
    };

    client.add_into(first, second, out)?;
    log::trace!("add_n step 1: {} + {} -> {}", first.id(), second.id(), out.id());

    for (offset, input) in rest.iter().enumerate() {
        let fresh = Tensor::<R>::try_alloc(client, out.shape(), out.dtype())?;
        let previous = std::mem::replace(out, fresh);
        client.add_into(input, &previous, out)?;
        log::trace!(
            "add_n step {}: {} + {} -> {}",
            offset + 2,
            input.id(),
            previous.id(),
            out.id()
        );
    }

    Ok(())
}

/// One call to the fused `"sum"` operator
fn fused_dispatch<R, C>(client: &C, inputs: &[&Tensor<R>], out: &mut Tensor<R>) -> Result<()>
where
    R: Runtime,
    C: OperatorRunner<R>,
{
    let mut operands: InputOperands<'_, R> = OperandMap::new();
    for (index, input) in inputs.iter().enumerate() {
        let slot = INPUT_SLOTS
            .name(index)
            .ok_or_else(|| Error::Internal(format!("no name for input slot {index}")))?;
        operands.bind(INPUT_ROLE, slot, *input);
    }

    let mut outputs: OutputOperands<'_, R> = OperandMap::new();
    outputs.bind(OUTPUT_ROLE, OUTPUT_SLOT, out);

    log::trace!("add_n: dispatching {SUM_OP} over {} operands", inputs.len());
    client.run_operator(SUM_OP, &operands, &mut outputs, &OpAttrs::new())
}
