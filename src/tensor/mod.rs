//! Tensor types
//!
//! This module provides the core `Tensor` type, a contiguous n-dimensional
//! buffer stored on a compute device.

mod core;
mod id;
mod shape;
mod storage;

pub use core::Tensor;
pub use id::TensorId;
pub use shape::Shape;
pub use storage::Storage;
