//! Memory allocator trait and default implementation

use crate::error::Result;
use crate::runtime::Runtime;
use std::fmt;

/// Memory allocator trait for runtime backends
///
/// An allocator is bound to one device. Kernels obtain buffers through it
/// (via `Tensor::try_alloc`) and release them by dropping tensors, so every
/// buffer it hands out must be releasable by the runtime's `deallocate`.
pub trait Allocator: Clone + Send + Sync {
    /// Allocate memory of given size
    ///
    /// Returns a device pointer (u64) that can be used for operations.
    fn allocate(&self, size_bytes: usize) -> Result<u64>;

    /// Deallocate memory
    fn deallocate(&self, ptr: u64, size_bytes: usize);

    /// Get the total allocated bytes
    fn allocated_bytes(&self) -> usize {
        0 // Default: tracking not supported
    }
}

/// Default allocator that delegates to Runtime methods
///
/// This is a thin allocator bound to a device that forwards to the runtime's
/// static `allocate` / `deallocate` / `allocated_bytes`.
pub struct DefaultAllocator<R: Runtime> {
    device: R::Device,
}

impl<R: Runtime> DefaultAllocator<R> {
    /// Create a new default allocator
    pub fn new(device: R::Device) -> Self {
        Self { device }
    }

    /// Get the device this allocator is associated with
    pub fn device(&self) -> &R::Device {
        &self.device
    }
}

impl<R: Runtime> Clone for DefaultAllocator<R> {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for DefaultAllocator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAllocator")
            .field("runtime", &R::name())
            .field("device", &self.device)
            .finish()
    }
}

impl<R: Runtime> Allocator for DefaultAllocator<R> {
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        R::allocate(size_bytes, &self.device)
    }

    fn deallocate(&self, ptr: u64, size_bytes: usize) {
        R::deallocate(ptr, size_bytes, &self.device)
    }

    fn allocated_bytes(&self) -> usize {
        R::allocated_bytes(&self.device)
    }
}
