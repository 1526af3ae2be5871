//! Reference-counted device buffers backing tensors

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{Allocator, Runtime};
use std::fmt;
use std::sync::Arc;

/// Bytes needed for `numel` elements of `dtype`
///
/// A size that does not fit in `usize` can never be allocated, so it is
/// reported as `OutOfMemory` rather than wrapping.
pub(crate) fn byte_len(numel: usize, dtype: DType) -> Result<usize> {
    numel
        .checked_mul(dtype.size_in_bytes())
        .ok_or(Error::OutOfMemory { size: usize::MAX })
}

/// Typed view of one device allocation
///
/// Clones share the allocation. It is handed back to the runtime when the last
/// clone drops. A zero-byte storage has address 0 and owns nothing.
pub struct Storage<R: Runtime> {
    buffer: Arc<DeviceBuffer<R>>,
}

struct DeviceBuffer<R: Runtime> {
    addr: u64,
    numel: usize,
    dtype: DType,
    device: R::Device,
}

impl<R: Runtime> Drop for DeviceBuffer<R> {
    fn drop(&mut self) {
        if self.addr == 0 {
            return;
        }
        // The size was validated when the buffer was created.
        let bytes = self.numel * self.dtype.size_in_bytes();
        R::deallocate(self.addr, bytes, &self.device);
    }
}

impl<R: Runtime> Storage<R> {
    /// Allocate room for `len` elements of `dtype` straight from the runtime
    pub fn new(len: usize, dtype: DType, device: &R::Device) -> Result<Self> {
        let addr = R::allocate(byte_len(len, dtype)?, device)?;
        Ok(Self::adopt(addr, len, dtype, device))
    }

    /// Allocate room for `len` elements of `dtype` through a client's allocator
    ///
    /// `allocator` must be bound to `device` and hand out buffers that
    /// `R::deallocate` can release, as [`crate::runtime::DefaultAllocator`] does.
    pub fn new_in<A: Allocator>(
        allocator: &A,
        len: usize,
        dtype: DType,
        device: &R::Device,
    ) -> Result<Self> {
        let addr = allocator.allocate(byte_len(len, dtype)?)?;
        Ok(Self::adopt(addr, len, dtype, device))
    }

    /// Upload a typed host slice
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Result<Self> {
        Self::from_bytes(bytemuck::cast_slice(data), T::DTYPE, device)
    }

    /// Upload raw host bytes interpreted as `dtype`
    ///
    /// This is the only way to build storage for dtypes without an
    /// [`Element`] type, such as `Bool`. A trailing partial element is an error.
    pub fn from_bytes(data: &[u8], dtype: DType, device: &R::Device) -> Result<Self> {
        let width = dtype.size_in_bytes();
        if data.len() % width != 0 {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!("{} bytes is not a whole number of {dtype} elements", data.len()),
            });
        }

        // Adopt first so the buffer is released if the upload fails.
        let storage = Self::new(data.len() / width, dtype, device)?;
        R::copy_to_device(data, storage.ptr(), device)?;
        Ok(storage)
    }

    fn adopt(addr: u64, numel: usize, dtype: DType, device: &R::Device) -> Self {
        Self {
            buffer: Arc::new(DeviceBuffer {
                addr,
                numel,
                dtype,
                device: device.clone(),
            }),
        }
    }

    /// Device address of the first element (0 for empty storage)
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.buffer.addr
    }

    /// Element count
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.numel
    }

    /// True when the storage holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.numel == 0
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.buffer.dtype
    }

    /// Device holding the buffer
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.buffer.device
    }

    /// Buffer size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.buffer.numel * self.buffer.dtype.size_in_bytes()
    }

    /// Number of handles sharing the buffer
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.buffer)
    }

    /// True when both handles point at the same non-empty allocation
    #[inline]
    pub fn shares_buffer(&self, other: &Self) -> bool {
        self.ptr() != 0 && self.ptr() == other.ptr()
    }

    /// Download the contents as `T`
    ///
    /// `T` must have the width of the storage dtype; callers check the dtype.
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Result<Vec<T>> {
        let mut host: Vec<T> = vec![T::zeroed(); self.len()];
        R::copy_from_device(self.ptr(), bytemuck::cast_slice_mut(&mut host), self.device())?;
        Ok(host)
    }

    /// Download the raw bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut host = vec![0u8; self.size_in_bytes()];
        R::copy_from_device(self.ptr(), &mut host, self.device())?;
        Ok(host)
    }
}

impl<R: Runtime> Clone for Storage<R> {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<R: Runtime> fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("addr", &format_args!("{:#x}", self.ptr()))
            .field("len", &self.len())
            .field("dtype", &self.dtype())
            .field("refs", &self.ref_count())
            .finish()
    }
}
