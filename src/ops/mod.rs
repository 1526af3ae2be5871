//! Tensor operations
//!
//! This module defines operation traits and their CPU implementations.
//!
//! # Design
//!
//! Operations are defined as traits that are implemented by `RuntimeClient`.
//! This gives operations access to device and allocator for creating output tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── BinaryOps<R>       add, add_into
//!   ├── MemoryOps<R>       copy_into
//!   ├── OperatorRunner<R>  run_operator (named operators from the registry)
//!   └── AccumulateOps<R>   add_n, sum_n (built on the three above)
//! ```
//!
//! # Implementing Operations for a New Backend
//!
//! 1. Implement [`Kernel`] (typed pointer kernels) for the backend's client.
//! 2. Implement [`BinaryOps`], [`MemoryOps`] and [`OperatorRunner`].
//! 3. Implement [`AccumulateOps`] by delegating to
//!    [`impl_generic::add_n_impl`] and [`impl_generic::sum_n_impl`].

mod dispatch;
pub mod impl_generic;
mod operands;
pub mod registry;
pub(crate) mod traits;

mod cpu;

pub use operands::{AttrValue, InputOperands, OpAttrs, Operand, OperandMap, OutputOperands};
pub use traits::{AccumulateOps, BinaryOps, Kernel, MemoryOps, OperatorRunner};
