//! CPU implementations of the ops traits.

mod accumulate;
mod binary;
mod memory;
mod runner;
