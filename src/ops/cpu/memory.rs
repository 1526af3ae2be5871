//! CPU implementation of memory operations.

use crate::error::Result;
use crate::ops::MemoryOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::copy_into_impl};
use crate::tensor::Tensor;

impl MemoryOps<CpuRuntime> for CpuClient {
    fn copy_into(&self, src: &Tensor<CpuRuntime>, dst: &mut Tensor<CpuRuntime>) -> Result<()> {
        copy_into_impl(self, src, dst)
    }
}
