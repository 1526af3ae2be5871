//! # addn
//!
//! **N-ary element-wise tensor summation with two interchangeable strategies.**
//!
//! `add_n` takes any number of same-shaped, same-dtype tensors and writes their
//! element-wise sum into an output tensor. How the sum is computed depends on
//! [`config::KernelConfig`]:
//!
//! - **Pairwise reduction** (`use_scatter_memory = true`): a left-to-right chain
//!   of binary adds, each step writing into a freshly allocated buffer and
//!   releasing the one before it.
//! - **Fused dispatch** (`use_scatter_memory = false`, the default): a single
//!   call to the `"sum"` operator through the generic operator runner.
//!
//! A single input is copied, not added.
//!
//! ## Quick Start
//!
//! ```rust
//! use addn::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let a = Tensor::<CpuRuntime>::from_slice(&[1i32, 2], &[2], &device);
//! let b = Tensor::<CpuRuntime>::from_slice(&[3i32, 4], &[2], &device);
//! let c = Tensor::<CpuRuntime>::from_slice(&[5i32, 6], &[2], &device);
//!
//! let pairwise = KernelConfig::default().with_scatter_memory(true);
//! let sum = client.sum_n(&[&a, &b, &c], &pairwise)?;
//! assert_eq!(sum.to_vec::<i32>(), [9, 12]);
//! # Ok::<(), addn::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded CPU kernels
//! - `f16`: Half-precision floats (F16, BF16)
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger:
//! `debug` once per `add_n` call and per resolved operator, `trace` per
//! reduction step.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::KernelConfig;
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        AccumulateOps, AttrValue, BinaryOps, InputOperands, MemoryOps, OpAttrs, OperandMap,
        OperatorRunner, OutputOperands,
    };
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::Tensor;
}

/// Default runtime
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
