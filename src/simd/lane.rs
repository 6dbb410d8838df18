//! Lane element types
//!
//! A [`Lane`] is one element slot of a vector register. Only plain integer and
//! float types qualify: every bit pattern of their storage is a valid value, so
//! a register's bytes can always be viewed as a slice of lanes.

use std::fmt;

mod private {
    pub trait Sealed {}
}

/// Element type of a [`VectorRegister`](super::VectorRegister).
///
/// The scalar methods are the reference semantics every kernel must match:
/// integer arithmetic wraps, float arithmetic follows IEEE-754.
pub trait Lane:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static + private::Sealed
{
    /// Size of one lane in bytes
    const SIZE: usize;
    /// The value one
    const ONE: Self;

    /// Lane-wise addition
    fn lane_add(self, rhs: Self) -> Self;
    /// Lane-wise subtraction
    fn lane_sub(self, rhs: Self) -> Self;
    /// Lane-wise multiplication
    fn lane_mul(self, rhs: Self) -> Self;
    /// Lane-wise division
    ///
    /// # Panics
    ///
    /// Integer lanes panic on division by zero, like scalar Rust.
    fn lane_div(self, rhs: Self) -> Self;
    /// Smaller of two lanes
    fn lane_min(self, rhs: Self) -> Self;
    /// Larger of two lanes
    fn lane_max(self, rhs: Self) -> Self;
}

/// Lanes that have an absolute value: signed integers and floats.
///
/// Unsigned lanes deliberately do not implement this, so asking for the
/// absolute value of an unsigned register does not compile.
pub trait SignedLane: Lane {
    /// Absolute value, wrapping `MIN` to itself for integers
    fn lane_abs(self) -> Self;
}

macro_rules! impl_int_lane {
    ($($ty:ty),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Lane for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const ONE: Self = 1;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }

            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }

            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
        }
    )*};
}

macro_rules! impl_float_lane {
    ($($ty:ty),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl Lane for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const ONE: Self = 1.0;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn lane_min(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline(always)]
            fn lane_max(self, rhs: Self) -> Self {
                self.max(rhs)
            }
        }

        impl SignedLane for $ty {
            #[inline(always)]
            fn lane_abs(self) -> Self {
                self.abs()
            }
        }
    )*};
}

impl_int_lane!(u8, i8, u16, i16, u32, i32, u64, i64);

impl_float_lane!(f32, f64);

macro_rules! impl_signed_int_lane {
    ($($ty:ty),*) => {$(
        impl SignedLane for $ty {
            #[inline(always)]
            fn lane_abs(self) -> Self {
                self.wrapping_abs()
            }
        }
    )*};
}

impl_signed_int_lane!(i8, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_sizes() {
        assert_eq!(u8::SIZE, 1);
        assert_eq!(i16::SIZE, 2);
        assert_eq!(f32::SIZE, 4);
        assert_eq!(u64::SIZE, 8);
        assert_eq!(u16::ONE, 1);
        assert_eq!(f64::ONE, 1.0);
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(250u8.lane_add(10), 4);
        assert_eq!(0u8.lane_sub(1), 255);
        assert_eq!(i8::MIN.lane_abs(), i8::MIN);
        assert_eq!((-5i32).lane_abs(), 5);
        assert_eq!(200u8.lane_mul(2), 144);
    }

    #[test]
    fn test_min_max_respect_signedness() {
        assert_eq!((-1i8).lane_max(1), 1);
        assert_eq!(255u8.lane_max(1), 255);
        assert_eq!((-2.5f32).lane_min(1.0), -2.5);
        assert_eq!((-2.5f64).lane_abs(), 2.5);
    }
}
