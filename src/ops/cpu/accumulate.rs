//! CPU implementation of N-ary accumulation.

use crate::config::KernelConfig;
use crate::error::Result;
use crate::ops::AccumulateOps;
use crate::ops::impl_generic::{add_n_impl, sum_n_impl};
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl AccumulateOps<CpuRuntime> for CpuClient {
    fn add_n(
        &self,
        inputs: &[&Tensor<CpuRuntime>],
        out: &mut Tensor<CpuRuntime>,
        config: &KernelConfig,
    ) -> Result<()> {
        add_n_impl(self, inputs, out, config)
    }

    fn sum_n(
        &self,
        inputs: &[&Tensor<CpuRuntime>],
        config: &KernelConfig,
    ) -> Result<Tensor<CpuRuntime>> {
        sum_n_impl(self, inputs, config)
    }
}
