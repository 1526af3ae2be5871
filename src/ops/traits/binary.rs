//! Binary operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise binary addition on tensors.
///
/// Operands must have identical shapes and dtypes; there is no broadcasting.
///
/// # Example
///
/// ```
/// use addn::prelude::*;
///
/// let device = CpuDevice::new();
/// let client = CpuRuntime::default_client(&device);
///
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
/// let b = Tensor::<CpuRuntime>::from_slice(&[5.0f32, 6.0, 7.0, 8.0], &[2, 2], &device);
///
/// let c = client.add(&a, &b)?;
/// assert_eq!(c.to_vec::<f32>(), [6.0, 8.0, 10.0, 12.0]);
/// # Ok::<(), addn::error::Error>(())
/// ```
pub trait BinaryOps<R: Runtime> {
    /// Element-wise addition into a new tensor: a + b
    fn add(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise addition into a pre-allocated output: out = a + b
    ///
    /// `out` must already have the operands' shape and dtype, and must not share
    /// storage with `a` or `b` (`Error::AliasedOutput`). Integer addition wraps.
    fn add_into(&self, a: &Tensor<R>, b: &Tensor<R>, out: &mut Tensor<R>) -> Result<()>;
}
