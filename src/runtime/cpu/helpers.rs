//! Tensor-level implementations behind the CPU ops traits
//!
//! Each helper validates its operands, resolves the dtype with
//! `dispatch_dtype!` and hands raw pointers to the typed kernels.

use super::{CpuClient, CpuRuntime};
use crate::dispatch_dtype;
use crate::error::{Error, Result};
use crate::ops::Kernel;
use crate::runtime::helpers::{
    ensure_not_aliased, validate_binary_operands, validate_homogeneous, validate_output,
};
use crate::runtime::{Device, Runtime};
use crate::tensor::Tensor;

fn ensure_on_device(client: &CpuClient, t: &Tensor<CpuRuntime>) -> Result<()> {
    if !t.device().is_same(&client.device) {
        return Err(Error::DeviceMismatch);
    }
    Ok(())
}

/// `out = a + b` into a pre-allocated, non-aliased output
pub fn add_into_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
    out: &mut Tensor<CpuRuntime>,
) -> Result<()> {
    let dtype = validate_binary_operands(a, b)?;
    ensure_on_device(client, a)?;
    ensure_on_device(client, out)?;
    validate_output(out, a.shape(), dtype)?;
    ensure_not_aliased(out, &[a, b], "add")?;

    let len = a.numel();
    let a_ptr = a.storage().ptr();
    let b_ptr = b.storage().ptr();
    let out_ptr = out.storage().ptr();

    dispatch_dtype!(dtype, T => {
        unsafe {
            <CpuClient as Kernel<CpuRuntime>>::add::<T>(
                client,
                a_ptr as *const T,
                b_ptr as *const T,
                out_ptr as *mut T,
                len,
            );
        }
    }, "add");

    Ok(())
}

/// `a + b` into a newly allocated tensor
pub fn add_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let dtype = validate_binary_operands(a, b)?;
    let mut out = Tensor::<CpuRuntime>::try_alloc(client, a.shape(), dtype)?;
    add_into_impl(client, a, b, &mut out)?;
    Ok(out)
}

/// Byte copy of `src` into `dst`
///
/// Works for every dtype, including those without arithmetic.
pub fn copy_into_impl(
    client: &CpuClient,
    src: &Tensor<CpuRuntime>,
    dst: &mut Tensor<CpuRuntime>,
) -> Result<()> {
    ensure_on_device(client, src)?;
    ensure_on_device(client, dst)?;
    validate_output(dst, src.shape(), src.dtype())?;
    ensure_not_aliased(dst, &[src], "copy")?;

    CpuRuntime::copy_within_device(
        src.storage().ptr(),
        dst.storage().ptr(),
        src.storage().size_in_bytes(),
        &client.device,
    )
}

/// Fused N-ary sum; rebinds `out` to a freshly allocated result
///
/// A single input is copied rather than summed.
pub fn sum_impl(
    client: &CpuClient,
    inputs: &[&Tensor<CpuRuntime>],
    out: &mut Tensor<CpuRuntime>,
) -> Result<()> {
    let first = validate_homogeneous(inputs, "sum")?;
    ensure_on_device(client, first)?;
    let dtype = first.dtype();

    *out = Tensor::<CpuRuntime>::try_alloc(client, first.shape(), dtype)?;

    if let [only] = inputs {
        return copy_into_impl(client, only, out);
    }

    let len = first.numel();
    let out_ptr = out.storage().ptr();

    dispatch_dtype!(dtype, T => {
        let srcs: Vec<*const T> = inputs
            .iter()
            .map(|t| t.storage().ptr() as *const T)
            .collect();
        unsafe {
            <CpuClient as Kernel<CpuRuntime>>::sum_n::<T>(client, &srcs, out_ptr as *mut T, len);
        }
    }, "sum");

    Ok(())
}
