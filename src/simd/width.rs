//! Register widths and their aligned storage
//!
//! A [`Width`] fixes how many bytes a register holds. Its storage type is a byte
//! array aligned to its own size, which is what lets kernels use aligned vector
//! loads and stores on it.

use super::kernel::Backend;
use super::lane::Lane;
use std::fmt;
use std::hash::Hash;

mod private {
    pub trait Sealed {}
}

/// 16 bytes aligned to 16
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[repr(C, align(16))]
pub struct Bytes16(pub [u8; 16]);

/// 32 bytes aligned to 32
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[repr(C, align(32))]
pub struct Bytes32(pub [u8; 32]);

macro_rules! impl_bytes {
    ($($name:ident => $n:literal),*) => {$(
        impl $name {
            /// Wrap a byte array
            #[inline(always)]
            pub const fn new(bytes: [u8; $n]) -> Self {
                Self(bytes)
            }

            /// All bytes zero
            pub const ZERO: Self = Self([0; $n]);
        }

        impl AsRef<[u8]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsMut<[u8]> for $name {
            #[inline(always)]
            fn as_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }
        }
    )*};
}

impl_bytes!(Bytes16 => 16, Bytes32 => 32);

/// Register width selected at compile time.
pub trait Width: Copy + Default + fmt::Debug + Send + Sync + 'static + private::Sealed {
    /// Register size in bytes, also its alignment
    const BYTES: usize;
    /// Kernel family compiled for this width
    const BACKEND: Backend;

    /// Aligned register storage
    type Bytes: Copy
        + Default
        + Eq
        + Hash
        + fmt::Debug
        + AsRef<[u8]>
        + AsMut<[u8]>
        + Send
        + Sync
        + 'static;

    /// Zeroed buffer three registers wide, used by lane shifts
    type Scratch: AsRef<[u8]> + AsMut<[u8]>;

    /// Create a zeroed shift buffer
    fn scratch() -> Self::Scratch;

    /// Bitwise and
    #[inline(always)]
    fn and(a: &Self::Bytes, b: &Self::Bytes) -> Self::Bytes {
        zip_bytes::<Self>(a, b, |x, y| x & y)
    }

    /// Bitwise or
    #[inline(always)]
    fn or(a: &Self::Bytes, b: &Self::Bytes) -> Self::Bytes {
        zip_bytes::<Self>(a, b, |x, y| x | y)
    }

    /// Bitwise exclusive or
    #[inline(always)]
    fn xor(a: &Self::Bytes, b: &Self::Bytes) -> Self::Bytes {
        zip_bytes::<Self>(a, b, |x, y| x ^ y)
    }

    /// Bitwise complement
    #[inline(always)]
    fn not(a: &Self::Bytes) -> Self::Bytes {
        let mut out = *a;
        out.as_mut().iter_mut().for_each(|byte| *byte = !*byte);
        out
    }
}

/// 128-bit registers (SSE / NEON class)
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct W128;

/// 256-bit registers (AVX2 class)
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct W256;

impl private::Sealed for W128 {}
impl private::Sealed for W256 {}

impl Width for W128 {
    const BYTES: usize = 16;

    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable")))]
    const BACKEND: Backend = Backend::Sse41;
    #[cfg(not(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable"))))]
    const BACKEND: Backend = Backend::Portable;

    type Bytes = Bytes16;
    type Scratch = [u8; 48];

    #[inline(always)]
    fn scratch() -> Self::Scratch {
        [0; 48]
    }
}

impl Width for W256 {
    const BYTES: usize = 32;

    #[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable")))]
    const BACKEND: Backend = Backend::Avx2;
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable"))))]
    const BACKEND: Backend = Backend::Portable;

    type Bytes = Bytes32;
    type Scratch = [u8; 96];

    #[inline(always)]
    fn scratch() -> Self::Scratch {
        [0; 96]
    }
}

#[inline(always)]
fn zip_bytes<W: Width>(a: &W::Bytes, b: &W::Bytes, op: impl Fn(u8, u8) -> u8) -> W::Bytes {
    let mut out = W::Bytes::default();
    for ((dst, &x), &y) in out.as_mut().iter_mut().zip(a.as_ref()).zip(b.as_ref()) {
        *dst = op(x, y);
    }
    out
}

/// View register storage as lanes.
#[inline(always)]
pub(crate) fn lanes<E: Lane, W: Width>(bytes: &W::Bytes) -> &[E] {
    let raw = bytes.as_ref();
    debug_assert_eq!(raw.len(), W::BYTES);
    debug_assert_eq!(raw.as_ptr() as usize % std::mem::align_of::<E>(), 0);
    // SAFETY: storage is aligned to W::BYTES, which is a multiple of the lane
    // alignment; W::BYTES is a multiple of E::SIZE; Lane is sealed to integer
    // and float types, for which every bit pattern is valid.
    unsafe { std::slice::from_raw_parts(raw.as_ptr().cast::<E>(), W::BYTES / E::SIZE) }
}

/// Mutable view of register storage as lanes.
#[inline(always)]
pub(crate) fn lanes_mut<E: Lane, W: Width>(bytes: &mut W::Bytes) -> &mut [E] {
    let raw = bytes.as_mut();
    debug_assert_eq!(raw.len(), W::BYTES);
    debug_assert_eq!(raw.as_ptr() as usize % std::mem::align_of::<E>(), 0);
    // SAFETY: see `lanes`; the exclusive borrow of `bytes` is carried over.
    unsafe { std::slice::from_raw_parts_mut(raw.as_mut_ptr().cast::<E>(), W::BYTES / E::SIZE) }
}
