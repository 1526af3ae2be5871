//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait family that the accumulation kernels
//! run against, plus the CPU reference backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, static allocate/copy entry points)
//! ├── Device (identifies a compute unit; CPU carries a memory tracker)
//! ├── Client (dispatches operations, owns the allocator)
//! └── Allocator (device-bound memory management)
//! ```

mod allocator;
pub(crate) mod helpers;
mod traits;

pub mod cpu;

pub use allocator::{Allocator, DefaultAllocator};
pub use traits::{Device, Runtime, RuntimeClient};
