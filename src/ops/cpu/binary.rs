//! CPU implementation of binary operations.

use crate::error::Result;
use crate::ops::BinaryOps;
use crate::runtime::cpu::{
    CpuClient, CpuRuntime,
    helpers::{add_impl, add_into_impl},
};
use crate::tensor::Tensor;

/// BinaryOps implementation for CPU runtime.
impl BinaryOps<CpuRuntime> for CpuClient {
    fn add(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        add_impl(self, a, b)
    }

    fn add_into(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        out: &mut Tensor<CpuRuntime>,
    ) -> Result<()> {
        add_into_impl(self, a, b, out)
    }
}
