//! N-ary accumulation trait.

use crate::config::KernelConfig;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise summation of any number of same-shaped tensors.
///
/// # Strategies
///
/// [`KernelConfig::use_scatter_memory`] picks how the sum is computed:
///
/// - `true`: pairwise reduction through [`super::BinaryOps::add_into`], with a
///   fresh intermediate buffer per step. The previous buffer is released as soon
///   as the step that consumed it ends.
/// - `false`: a single fused call to the `"sum"` operator of
///   [`super::OperatorRunner`].
///
/// Both strategies add inputs left to right in index order. A single input is
/// copied, never added.
///
/// # Example
///
/// ```
/// use addn::prelude::*;
///
/// let device = CpuDevice::new();
/// let client = CpuRuntime::default_client(&device);
/// let xs = [
///     Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0], &[2], &device),
///     Tensor::<CpuRuntime>::from_slice(&[3.0f32, 4.0], &[2], &device),
///     Tensor::<CpuRuntime>::from_slice(&[5.0f32, 6.0], &[2], &device),
/// ];
/// let inputs: Vec<&Tensor<CpuRuntime>> = xs.iter().collect();
///
/// let mut out = Tensor::<CpuRuntime>::empty(&[0], DType::F32, &device);
/// client.add_n(&inputs, &mut out, &KernelConfig::default())?;
/// assert_eq!(out.to_vec::<f32>(), [9.0, 12.0]);
/// # Ok::<(), addn::error::Error>(())
/// ```
pub trait AccumulateOps<R: Runtime> {
    /// Sum `inputs` element-wise into `out`
    ///
    /// Whatever `out` held before is discarded; on success it has the shape and
    /// dtype of the inputs. Fails with `Error::InvalidArgument` when `inputs` is
    /// empty; every other error comes from the add, copy or runner it calls.
    fn add_n(&self, inputs: &[&Tensor<R>], out: &mut Tensor<R>, config: &KernelConfig)
    -> Result<()>;

    /// Sum `inputs` element-wise into a new tensor
    fn sum_n(&self, inputs: &[&Tensor<R>], config: &KernelConfig) -> Result<Tensor<R>>;
}
