//! Kernel trait implementation for CPU runtime

use super::CpuRuntime;
use super::client::CpuClient;
use super::kernels;
use crate::dtype::Element;
use crate::ops::Kernel;

#[allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe
impl Kernel<CpuRuntime> for CpuClient {
    unsafe fn add<T: Element>(&self, a: *const T, b: *const T, out: *mut T, len: usize) {
        kernels::add_kernel(a, b, out, len);
    }

    unsafe fn sum_n<T: Element>(&self, srcs: &[*const T], out: *mut T, len: usize) {
        kernels::sum_n_kernel(srcs, out, len);
    }
}
