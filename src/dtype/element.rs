//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;
use std::ops::Add;

/// Trait for types that can be elements of an addable tensor
///
/// This trait connects Rust's type system to the runtime dtype system.
/// It's implemented for all primitive numeric types, and for `half::f16` /
/// `half::bf16` when the `f16` feature is enabled.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `Add` - The only arithmetic the accumulation kernels need
///
/// Integer addition wraps on overflow. Kernels must behave identically in debug
/// and release builds, so they go through [`Element::add_elem`] rather than `+`.
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + Debug + PartialEq + 'static + Add<Output = Self>
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Element-wise addition as performed by the kernels
    fn add_elem(self, rhs: Self) -> Self;
}

macro_rules! impl_float_element {
    ($ty:ty, $dtype:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn add_elem(self, rhs: Self) -> Self {
                self + rhs
            }
        }
    };
}

macro_rules! impl_int_element {
    ($ty:ty, $dtype:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn add_elem(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
        }
    };
}

impl_float_element!(f64, F64);
impl_float_element!(f32, F32);

impl_int_element!(i64, I64);
impl_int_element!(i32, I32);
impl_int_element!(i16, I16);
impl_int_element!(i8, I8);
impl_int_element!(u64, U64);
impl_int_element!(u32, U32);
impl_int_element!(u16, U16);
impl_int_element!(u8, U8);

// Note: bool doesn't implement Pod and has no addition, so Bool tensors have no
// Element type. They can still be copied, which is dtype-agnostic.

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn add_elem(self, rhs: Self) -> Self {
        self + rhs
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn add_elem(self, rhs: Self) -> Self {
        self + rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
    }

    #[test]
    fn test_integer_add_wraps() {
        assert_eq!(250u8.add_elem(10), 4);
        assert_eq!(i8::MAX.add_elem(1), i8::MIN);
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_element() {
        let a = half::f16::from_f32(1.5);
        let b = half::f16::from_f32(2.0);
        assert_eq!(a.add_elem(b), half::f16::from_f32(3.5));
        assert_eq!(half::bf16::DTYPE, DType::BF16);
    }
}
