//! Shared validation helpers for runtime backends
//!
//! Backends call these before touching device memory so that every backend
//! reports the same error for the same misuse.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use crate::tensor::Tensor;

/// Validate that two operands of an element-wise op agree on dtype and shape.
///
/// Returns the shared dtype.
pub fn validate_binary_operands<R: Runtime>(a: &Tensor<R>, b: &Tensor<R>) -> Result<DType> {
    if a.dtype() != b.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        });
    }
    if a.shape() != b.shape() {
        return Err(Error::shape_mismatch(a.shape(), b.shape()));
    }
    if !a.device().is_same(b.device()) {
        return Err(Error::DeviceMismatch);
    }
    Ok(a.dtype())
}

/// Validate a list of operands that must all share dtype, shape and device.
///
/// Returns the first operand, which describes the whole list.
pub fn validate_homogeneous<'a, R: Runtime>(
    inputs: &[&'a Tensor<R>],
    op: &'static str,
) -> Result<&'a Tensor<R>> {
    let (first, rest) = inputs.split_first().ok_or_else(|| Error::InvalidArgument {
        arg: "inputs",
        reason: format!("{op} requires at least one input"),
    })?;
    for other in rest {
        validate_binary_operands(first, other)?;
    }
    Ok(first)
}

/// Validate that a pre-allocated output can receive a result of `shape`/`dtype`.
pub fn validate_output<R: Runtime>(out: &Tensor<R>, shape: &[usize], dtype: DType) -> Result<()> {
    if out.dtype() != dtype {
        return Err(Error::DTypeMismatch {
            lhs: dtype,
            rhs: out.dtype(),
        });
    }
    if out.shape() != shape {
        return Err(Error::shape_mismatch(shape, out.shape()));
    }
    Ok(())
}

/// Reject an output that shares its buffer with any of the operands.
pub fn ensure_not_aliased<R: Runtime>(
    out: &Tensor<R>,
    operands: &[&Tensor<R>],
    op: &'static str,
) -> Result<()> {
    if operands.iter().any(|t| out.shares_storage_with(t)) {
        return Err(Error::AliasedOutput { op });
    }
    Ok(())
}
