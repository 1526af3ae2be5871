//! Generic implementations of composite operations.
//!
//! Composite operations (operations built from primitives) are defined here as
//! generic functions with trait bounds. Backends provide thin wrappers that
//! call these implementations.
//!
//! ```text
//! impl_generic/accumulate.rs
//!     └── add_n_impl<R, C>()
//!             ├── BinaryOps::add_into + MemoryOps::copy_into (pairwise)
//!             └── OperatorRunner::run_operator("sum")        (fused)
//! ```

pub mod accumulate;

pub use accumulate::{add_n_impl, sum_n_impl};
