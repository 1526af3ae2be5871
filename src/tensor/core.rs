//! Core Tensor type

use super::{Shape, Storage, TensorId};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{Runtime, RuntimeClient};
use std::fmt;

/// Element count of `shape`, or `OutOfMemory` when it does not fit in `usize`
fn element_count(shape: &Shape) -> Result<usize> {
    shape
        .checked_numel()
        .ok_or(Error::OutOfMemory { size: usize::MAX })
}

/// Contiguous n-dimensional buffer stored on a compute device
///
/// `Tensor` is a handle consisting of:
/// - **Storage**: Reference-counted device memory
/// - **Shape**: Dimensions, row-major and always contiguous
/// - **DType**: Element type (determined at runtime)
///
/// Cloning a tensor is zero-copy: the clone gets a new [`TensorId`] but shares
/// the storage. Kernels that write into a tensor reject outputs sharing storage
/// with an operand.
///
/// # Example
///
/// ```
/// use addn::prelude::*;
///
/// let device = CpuDevice::new();
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
/// assert_eq!(a.shape(), &[2, 2]);
/// assert_eq!(a.dtype(), DType::F32);
/// ```
pub struct Tensor<R: Runtime> {
    /// Unique handle ID
    id: TensorId,
    /// Device memory
    storage: Storage<R>,
    /// Dimensions
    shape: Shape,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and shape
    ///
    /// Returns an error if the storage does not hold exactly `shape.numel()` elements.
    pub fn from_parts(storage: Storage<R>, shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        if storage.len() != element_count(&shape)? {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![storage.len()],
            });
        }

        Ok(Self {
            id: TensorId::new(),
            storage,
            shape,
        })
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions,
    /// or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let shape = Shape::from(shape);
        if data.len() != element_count(&shape)? {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, device)?;
        Self::from_parts(storage, shape)
    }

    /// Create a tensor from raw bytes with an explicit dtype
    ///
    /// This is how tensors of dtypes without an [`Element`] type (such as `Bool`)
    /// are built.
    pub fn try_from_bytes(
        data: &[u8],
        shape: &[usize],
        dtype: DType,
        device: &R::Device,
    ) -> Result<Self> {
        let shape = Shape::from(shape);
        let expected_bytes = element_count(&shape)?
            .checked_mul(dtype.size_in_bytes())
            .ok_or(Error::OutOfMemory { size: usize::MAX })?;
        if data.len() != expected_bytes {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len() / dtype.size_in_bytes()],
            });
        }

        let storage = Storage::from_bytes(data, dtype, device)?;
        Self::from_parts(storage, shape)
    }

    /// Create a tensor with freshly allocated storage
    ///
    /// The CPU backend zero-fills new allocations; other backends need not.
    /// Callers must write the tensor before reading it.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. For a fallible alternative, use [`Self::try_empty`].
    pub fn empty(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_empty(shape, dtype, device).expect("Tensor::empty failed")
    }

    /// Create a tensor with freshly allocated storage (fallible version)
    ///
    /// Shapes whose element or byte count overflows `usize` fail with
    /// `Error::OutOfMemory` before anything is allocated.
    pub fn try_empty(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let shape = Shape::from(shape);
        let storage = Storage::new(element_count(&shape)?, dtype, device)?;

        Ok(Self {
            id: TensorId::new(),
            storage,
            shape,
        })
    }

    /// Create a tensor on the client's device using the client's allocator
    ///
    /// Kernels allocate their outputs this way so that the bytes show up in
    /// `client.allocator().allocated_bytes()`.
    pub fn try_alloc<C: RuntimeClient<R>>(
        client: &C,
        shape: &[usize],
        dtype: DType,
    ) -> Result<Self> {
        let shape = Shape::from(shape);
        let len = element_count(&shape)?;
        let storage = Storage::new_in(client.allocator(), len, dtype, client.device())?;

        Ok(Self {
            id: TensorId::new(),
            storage,
            shape,
        })
    }

    // ===== Accessors =====

    /// Get the tensor ID
    #[inline]
    pub fn id(&self) -> TensorId {
        self.id
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Check if this tensor and `other` are views of the same device buffer
    #[inline]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.shares_buffer(&other.storage)
    }

    // ===== Data Access =====

    /// Copy tensor data to a Vec on the host
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor's dtype or the device copy fails.
    /// For a fallible alternative, use [`Self::try_to_vec`].
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.try_to_vec().expect("Tensor::to_vec failed")
    }

    /// Copy tensor data to a Vec on the host (fallible version)
    pub fn try_to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: T::DTYPE,
            });
        }
        self.storage.to_vec()
    }

    /// Copy the raw bytes of the tensor to the host
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.storage.to_bytes()
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone creates a new handle sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            id: TensorId::new(),
            storage: self.storage.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("dtype", &self.dtype())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}
