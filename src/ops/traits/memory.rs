//! Memory transfer operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Buffer-to-buffer copies on one device.
pub trait MemoryOps<R: Runtime> {
    /// Copy the contents of `src` into `dst`
    ///
    /// `dst` must have the same shape and dtype as `src` and must not share its
    /// storage. The copy is byte-wise, so every dtype is supported.
    fn copy_into(&self, src: &Tensor<R>, dst: &mut Tensor<R>) -> Result<()>;
}
