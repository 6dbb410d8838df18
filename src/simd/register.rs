//! # Vector registers
//!
//! [`VectorRegister<E, W>`] is `W::BYTES` bytes of aligned storage viewed as
//! lanes of type `E`. Lane-type dependent operations dispatch through the
//! [`Kernel`] table compiled for `W`; bitwise operations and lane shifts work
//! on the raw bytes.
//!
//! ```
//! use lanestr::simd::{U8x16, I32x8};
//!
//! let a = U8x16::splat(3);
//! let b = U8x16::splat(4);
//! assert!((a + b).simd_eq(U8x16::splat(7)).all());
//!
//! let v = I32x8::from_array([-1, 2, -3, 4, -5, 6, -7, 8]);
//! assert_eq!(v.abs().as_lanes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
//! assert_eq!((v << 1).lane(0), 0);
//! ```

use super::kernel::{comparison_mask, AbsKernel, Compare, Kernel};
use super::lane::Lane;
use super::mask::LaneMask;
use super::shuffle::shift_lanes;
use super::width::{lanes, lanes_mut, Width, W128, W256};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Index, IndexMut, Mul, MulAssign, Not, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

/// A hardware-width vector of `W::BYTES / size_of::<E>()` lanes.
#[repr(transparent)]
pub struct VectorRegister<E: Lane, W: Width> {
    bytes: W::Bytes,
    _lane: PhantomData<E>,
}

/// 16 lanes of `u8`
pub type U8x16 = VectorRegister<u8, W128>;
/// 16 lanes of `i8`
pub type I8x16 = VectorRegister<i8, W128>;
/// 8 lanes of `u16`
pub type U16x8 = VectorRegister<u16, W128>;
/// 8 lanes of `i16`
pub type I16x8 = VectorRegister<i16, W128>;
/// 4 lanes of `u32`
pub type U32x4 = VectorRegister<u32, W128>;
/// 4 lanes of `i32`
pub type I32x4 = VectorRegister<i32, W128>;
/// 2 lanes of `u64`
pub type U64x2 = VectorRegister<u64, W128>;
/// 2 lanes of `i64`
pub type I64x2 = VectorRegister<i64, W128>;
/// 4 lanes of `f32`
pub type F32x4 = VectorRegister<f32, W128>;
/// 2 lanes of `f64`
pub type F64x2 = VectorRegister<f64, W128>;
/// 32 lanes of `u8`
pub type U8x32 = VectorRegister<u8, W256>;
/// 32 lanes of `i8`
pub type I8x32 = VectorRegister<i8, W256>;
/// 16 lanes of `u16`
pub type U16x16 = VectorRegister<u16, W256>;
/// 16 lanes of `i16`
pub type I16x16 = VectorRegister<i16, W256>;
/// 8 lanes of `u32`
pub type U32x8 = VectorRegister<u32, W256>;
/// 8 lanes of `i32`
pub type I32x8 = VectorRegister<i32, W256>;
/// 4 lanes of `u64`
pub type U64x4 = VectorRegister<u64, W256>;
/// 4 lanes of `i64`
pub type I64x4 = VectorRegister<i64, W256>;
/// 8 lanes of `f32`
pub type F32x8 = VectorRegister<f32, W256>;
/// 4 lanes of `f64`
pub type F64x4 = VectorRegister<f64, W256>;

impl<E: Lane, W: Width> Clone for VectorRegister<E, W> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Lane, W: Width> Copy for VectorRegister<E, W> {}

impl<E: Lane, W: Width> Default for VectorRegister<E, W> {
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<E: Lane, W: Width> VectorRegister<E, W> {
    /// Number of lanes
    pub const LANES: usize = W::BYTES / E::SIZE;

    /// Bits set by a comparison in which every lane matches
    pub const COMPARISON_MASK: u32 = comparison_mask(W::BYTES, E::SIZE);

    /// Wrap aligned register storage.
    #[inline(always)]
    pub const fn from_raw(bytes: W::Bytes) -> Self {
        Self {
            bytes,
            _lane: PhantomData,
        }
    }

    /// All lanes zero
    #[inline(always)]
    pub fn zero() -> Self {
        Self::from_raw(W::Bytes::default())
    }

    /// Broadcast `value` into every lane.
    #[inline(always)]
    pub fn splat(value: E) -> Self {
        let mut register = Self::zero();
        register.as_lanes_mut().fill(value);
        register
    }

    /// Build a register from exactly [`LANES`](Self::LANES) values.
    ///
    /// Passing an array of any other length fails to compile.
    #[inline(always)]
    pub fn from_array<const N: usize>(values: [E; N]) -> Self {
        const { assert!(N == Self::LANES, "array length must equal the lane count") };
        let mut register = Self::zero();
        register.as_lanes_mut().copy_from_slice(&values);
        register
    }

    /// Build a register from a slice, or `None` unless it holds exactly
    /// [`LANES`](Self::LANES) values.
    pub fn try_from_slice(values: &[E]) -> Option<Self> {
        if values.len() != Self::LANES {
            return None;
        }
        let mut register = Self::zero();
        register.as_lanes_mut().copy_from_slice(values);
        Some(register)
    }

    /// Load from memory aligned to `W::BYTES`.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to `W::BYTES` and valid for reading `W::BYTES`
    /// bytes.
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const E) -> Self {
        debug_assert_eq!(ptr as usize % W::BYTES, 0, "unaligned register load");
        // SAFETY: the caller guarantees alignment and validity, and any bit
        // pattern is a valid lane.
        Self::from_raw(unsafe { ptr.cast::<W::Bytes>().read() })
    }

    /// Store to memory aligned to `W::BYTES`.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to `W::BYTES` and valid for writing `W::BYTES`
    /// bytes.
    #[inline(always)]
    pub unsafe fn store_aligned(self, ptr: *mut E) {
        debug_assert_eq!(ptr as usize % W::BYTES, 0, "unaligned register store");
        // SAFETY: the caller guarantees alignment and validity.
        unsafe { ptr.cast::<W::Bytes>().write(self.bytes) }
    }

    /// The lanes as a slice
    #[inline(always)]
    pub fn as_lanes(&self) -> &[E] {
        lanes::<E, W>(&self.bytes)
    }

    /// The lanes as a mutable slice
    #[inline(always)]
    pub fn as_lanes_mut(&mut self) -> &mut [E] {
        lanes_mut::<E, W>(&mut self.bytes)
    }

    /// Value of lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`.
    #[inline(always)]
    pub fn lane(&self, index: usize) -> E {
        self.as_lanes()[index]
    }

    /// The underlying storage
    #[inline(always)]
    pub const fn as_raw(&self) -> &W::Bytes {
        &self.bytes
    }

    /// Unwrap into the underlying storage
    #[inline(always)]
    pub fn into_raw(self) -> W::Bytes {
        self.bytes
    }

    /// Move lanes `amount` positions towards higher indices, filling with
    /// zeros. A negative amount moves the other way.
    #[inline]
    pub fn shuffle_left(self, amount: isize) -> Self {
        Self::from_raw(shift_lanes::<E, W>(&self.bytes, amount))
    }

    /// Move lanes `amount` positions towards lower indices, filling with
    /// zeros. A negative amount moves the other way.
    #[inline]
    pub fn shuffle_right(self, amount: isize) -> Self {
        self.shuffle_left(amount.saturating_neg())
    }
}

impl<E: Kernel<W>, W: Width> VectorRegister<E, W> {
    #[inline(always)]
    fn compare(self, op: Compare, rhs: Self) -> Self {
        Self::from_raw(<E as Kernel<W>>::compare(op, &self.bytes, &rhs.bytes))
    }

    #[inline(always)]
    fn mask(self, op: Compare, rhs: Self) -> LaneMask {
        let mask = self.compare(op, rhs);
        LaneMask::new(<E as Kernel<W>>::movemask(&mask.bytes), Self::COMPARISON_MASK)
    }

    /// Lanes equal to `rhs`
    #[inline(always)]
    pub fn simd_eq(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Eq, rhs)
    }

    /// Lanes not equal to `rhs`
    #[inline(always)]
    pub fn simd_ne(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Ne, rhs)
    }

    /// Lanes greater than `rhs`
    #[inline(always)]
    pub fn simd_gt(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Gt, rhs)
    }

    /// Lanes greater than or equal to `rhs`
    #[inline(always)]
    pub fn simd_ge(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Ge, rhs)
    }

    /// Lanes less than `rhs`
    #[inline(always)]
    pub fn simd_lt(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Lt, rhs)
    }

    /// Lanes less than or equal to `rhs`
    #[inline(always)]
    pub fn simd_le(self, rhs: Self) -> LaneMask {
        self.mask(Compare::Le, rhs)
    }

    /// Mask register with every bit set in lanes equal to `rhs`.
    ///
    /// Combine with `&` to select lanes arithmetically.
    #[inline(always)]
    pub fn lanes_eq(self, rhs: Self) -> Self {
        self.compare(Compare::Eq, rhs)
    }

    /// Mask register of lanes not equal to `rhs`
    #[inline(always)]
    pub fn lanes_ne(self, rhs: Self) -> Self {
        self.compare(Compare::Ne, rhs)
    }

    /// Mask register of lanes greater than `rhs`
    #[inline(always)]
    pub fn lanes_gt(self, rhs: Self) -> Self {
        self.compare(Compare::Gt, rhs)
    }

    /// Mask register of lanes greater than or equal to `rhs`
    #[inline(always)]
    pub fn lanes_ge(self, rhs: Self) -> Self {
        self.compare(Compare::Ge, rhs)
    }

    /// Mask register of lanes less than `rhs`
    #[inline(always)]
    pub fn lanes_lt(self, rhs: Self) -> Self {
        self.compare(Compare::Lt, rhs)
    }

    /// Mask register of lanes less than or equal to `rhs`
    #[inline(always)]
    pub fn lanes_le(self, rhs: Self) -> Self {
        self.compare(Compare::Le, rhs)
    }

    /// Lane-wise minimum
    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_raw(<E as Kernel<W>>::min(&self.bytes, &rhs.bytes))
    }

    /// Lane-wise maximum
    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_raw(<E as Kernel<W>>::max(&self.bytes, &rhs.bytes))
    }

    /// Add one to every lane. Integer lanes wrap at `MAX`.
    #[inline(always)]
    pub fn increment(&mut self) {
        *self += Self::splat(E::ONE);
    }

    /// Subtract one from every lane. Integer lanes wrap at `MIN`.
    #[inline(always)]
    pub fn decrement(&mut self) {
        *self -= Self::splat(E::ONE);
    }
}

impl<E: AbsKernel<W>, W: Width> VectorRegister<E, W> {
    /// Lane-wise absolute value. Integer `MIN` stays `MIN`.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::from_raw(<E as AbsKernel<W>>::abs(&self.bytes))
    }
}

macro_rules! arithmetic_op {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $kernel:ident;)*) => {$(
        impl<E: Kernel<W>, W: Width> $op for VectorRegister<E, W> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_raw(<E as Kernel<W>>::$kernel(&self.bytes, &rhs.bytes))
            }
        }

        impl<E: Kernel<W>, W: Width> $assign for VectorRegister<E, W> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    )*};
}

arithmetic_op! {
    Add::add, AddAssign::add_assign => add;
    Sub::sub, SubAssign::sub_assign => sub;
    Mul::mul, MulAssign::mul_assign => mul;
    Div::div, DivAssign::div_assign => div;
}

macro_rules! bitwise_op {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $width_fn:ident;)*) => {$(
        impl<E: Lane, W: Width> $op for VectorRegister<E, W> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_raw(W::$width_fn(&self.bytes, &rhs.bytes))
            }
        }

        impl<E: Lane, W: Width> $assign for VectorRegister<E, W> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    )*};
}

bitwise_op! {
    BitAnd::bitand, BitAndAssign::bitand_assign => and;
    BitOr::bitor, BitOrAssign::bitor_assign => or;
    BitXor::bitxor, BitXorAssign::bitxor_assign => xor;
}

impl<E: Lane, W: Width> Not for VectorRegister<E, W> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self::from_raw(W::not(&self.bytes))
    }
}

impl<E: Lane, W: Width> Shl<usize> for VectorRegister<E, W> {
    type Output = Self;

    /// Same as [`shuffle_left`](VectorRegister::shuffle_left).
    #[inline]
    fn shl(self, amount: usize) -> Self {
        self.shuffle_left(amount.min(Self::LANES) as isize)
    }
}

impl<E: Lane, W: Width> Shr<usize> for VectorRegister<E, W> {
    type Output = Self;

    /// Same as [`shuffle_right`](VectorRegister::shuffle_right).
    #[inline]
    fn shr(self, amount: usize) -> Self {
        self.shuffle_right(amount.min(Self::LANES) as isize)
    }
}

impl<E: Lane, W: Width> ShlAssign<usize> for VectorRegister<E, W> {
    #[inline]
    fn shl_assign(&mut self, amount: usize) {
        *self = *self << amount;
    }
}

impl<E: Lane, W: Width> ShrAssign<usize> for VectorRegister<E, W> {
    #[inline]
    fn shr_assign(&mut self, amount: usize) {
        *self = *self >> amount;
    }
}

impl<E: Lane, W: Width> Index<usize> for VectorRegister<E, W> {
    type Output = E;

    #[inline(always)]
    fn index(&self, index: usize) -> &E {
        &self.as_lanes()[index]
    }
}

impl<E: Lane, W: Width> IndexMut<usize> for VectorRegister<E, W> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut E {
        &mut self.as_lanes_mut()[index]
    }
}

/// Equal when every lane compares equal, so a NaN lane never equals itself.
impl<E: Kernel<W>, W: Width> PartialEq for VectorRegister<E, W> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.simd_eq(*other).all()
    }
}

impl<E: Lane, W: Width> fmt::Debug for VectorRegister<E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VectorRegister<{}x{}>", std::any::type_name::<E>(), Self::LANES)?;
        f.debug_list().entries(self.as_lanes()).finish()
    }
}
