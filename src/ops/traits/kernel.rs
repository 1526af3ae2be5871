//! Low-level kernel trait for compute operations.

use crate::dtype::Element;
use crate::runtime::Runtime;

/// Low-level typed kernels for accumulation
///
/// This trait defines the actual compute kernels that operate on typed pointers.
/// It is generic over `T: Element` for code reuse and specialization via
/// monomorphization.
///
/// # Safety Contract
///
/// All kernel methods are unsafe because they operate on raw pointers.
/// Callers must ensure:
/// - Pointers are valid and properly aligned
/// - Lengths accurately describe the buffer sizes
/// - No aliasing violations (output doesn't overlap with inputs)
pub trait Kernel<R: Runtime>: Send + Sync {
    /// Element-wise addition: `out[i] = a[i] + b[i]`
    ///
    /// # Safety
    /// - `a`, `b`, and `out` must be valid pointers to `len` elements
    /// - `out` must not overlap with `a` or `b`
    unsafe fn add<T: Element>(&self, a: *const T, b: *const T, out: *mut T, len: usize);

    /// Fused N-ary sum, folding `srcs` left to right for every element
    ///
    /// # Safety
    /// - `srcs` must be non-empty and each pointer valid for `len` elements
    /// - `out` must be valid for `len` elements and overlap none of `srcs`
    unsafe fn sum_n<T: Element>(&self, srcs: &[*const T], out: *mut T, len: usize);
}
