//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and provides the reference
//! implementation of every operation in the crate. All tensors are contiguous,
//! so kernels work on flat buffers and never need strided access.

mod client;
mod device;
pub(crate) mod helpers;
mod kernel;
pub(crate) mod kernels;
mod memory;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use memory::MemoryTracker;
pub use runtime::CpuRuntime;
