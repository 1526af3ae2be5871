//! Operation traits for tensor operations.
//!
//! This module contains trait definitions for the tensor operations.
//! Implementations are in the backend-specific modules (cpu/).

mod accumulate;
mod binary;
mod kernel;
mod memory;
mod runner;

pub use accumulate::AccumulateOps;
pub use binary::BinaryOps;
pub use kernel::Kernel;
pub use memory::MemoryOps;
pub use runner::OperatorRunner;
