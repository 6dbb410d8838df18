//! SSE4.1 kernels for 128-bit registers
//!
//! Compiled when the target enables SSE4.1 (which implies SSSE3 for the `abs`
//! instructions). 64-bit integer lanes stay portable: the signed 64-bit compare
//! only arrives with SSE4.2.
//!
//! Float `min`/`max` follow `minps`/`maxps`: a NaN in either lane yields the
//! second operand.

use super::{AbsKernel, Compare, Kernel};
use crate::simd::width::{Bytes16, W128};
use std::arch::x86_64::*;

#[inline(always)]
fn load(bytes: &Bytes16) -> __m128i {
    unsafe { _mm_load_si128(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store(vector: __m128i) -> Bytes16 {
    let mut out = Bytes16::ZERO;
    unsafe { _mm_store_si128(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn load_ps(bytes: &Bytes16) -> __m128 {
    unsafe { _mm_load_ps(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store_ps(vector: __m128) -> Bytes16 {
    let mut out = Bytes16::ZERO;
    unsafe { _mm_store_ps(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn load_pd(bytes: &Bytes16) -> __m128d {
    unsafe { _mm_load_pd(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store_pd(vector: __m128d) -> Bytes16 {
    let mut out = Bytes16::ZERO;
    unsafe { _mm_store_pd(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn not(vector: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(vector, _mm_set1_epi32(-1)) }
}

#[inline(always)]
fn movemask_bytes(mask: __m128i) -> u32 {
    unsafe { _mm_movemask_epi8(mask) as u32 }
}

#[inline(always)]
fn movemask_dwords(mask: __m128i) -> u32 {
    unsafe { _mm_movemask_ps(_mm_castsi128_ps(mask)) as u32 }
}

#[inline(always)]
fn cmpgt_epu8(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let bias = _mm_set1_epi8(i8::MIN);
        _mm_cmpgt_epi8(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias))
    }
}

#[inline(always)]
fn cmpgt_epu16(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let bias = _mm_set1_epi16(i16::MIN);
        _mm_cmpgt_epi16(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias))
    }
}

#[inline(always)]
fn cmpgt_epu32(a: __m128i, b: __m128i) -> __m128i {
    unsafe {
        let bias = _mm_set1_epi32(i32::MIN);
        _mm_cmpgt_epi32(_mm_xor_si128(a, bias), _mm_xor_si128(b, bias))
    }
}

macro_rules! int_kernel {
    ($($lane:ty {
        add: $add:ident,
        sub: $sub:ident,
        eq: $eq:ident,
        gt: $gt:ident,
        min: $min:ident,
        max: $max:ident,
        movemask: $movemask:ident
        $(, mul: $mul:ident)?
    })*) => {$(
        impl Kernel<W128> for $lane {
            #[inline(always)]
            fn add(a: &Bytes16, b: &Bytes16) -> Bytes16 {
                store(unsafe { $add(load(a), load(b)) })
            }

            #[inline(always)]
            fn sub(a: &Bytes16, b: &Bytes16) -> Bytes16 {
                store(unsafe { $sub(load(a), load(b)) })
            }

            $(
                #[inline(always)]
                fn mul(a: &Bytes16, b: &Bytes16) -> Bytes16 {
                    store(unsafe { $mul(load(a), load(b)) })
                }
            )?

            #[inline(always)]
            fn min(a: &Bytes16, b: &Bytes16) -> Bytes16 {
                store(unsafe { $min(load(a), load(b)) })
            }

            #[inline(always)]
            fn max(a: &Bytes16, b: &Bytes16) -> Bytes16 {
                store(unsafe { $max(load(a), load(b)) })
            }

            #[inline(always)]
            fn compare(op: Compare, a: &Bytes16, b: &Bytes16) -> Bytes16 {
                let (a, b) = (load(a), load(b));
                let mask = unsafe {
                    match op {
                        Compare::Eq => $eq(a, b),
                        Compare::Ne => not($eq(a, b)),
                        Compare::Gt => $gt(a, b),
                        Compare::Lt => $gt(b, a),
                        Compare::Ge => not($gt(b, a)),
                        Compare::Le => not($gt(a, b)),
                    }
                };
                store(mask)
            }

            #[inline(always)]
            fn movemask(mask: &Bytes16) -> u32 {
                $movemask(load(mask))
            }
        }
    )*};
}

int_kernel! {
    u8 {
        add: _mm_add_epi8,
        sub: _mm_sub_epi8,
        eq: _mm_cmpeq_epi8,
        gt: cmpgt_epu8,
        min: _mm_min_epu8,
        max: _mm_max_epu8,
        movemask: movemask_bytes
    }
    i8 {
        add: _mm_add_epi8,
        sub: _mm_sub_epi8,
        eq: _mm_cmpeq_epi8,
        gt: _mm_cmpgt_epi8,
        min: _mm_min_epi8,
        max: _mm_max_epi8,
        movemask: movemask_bytes
    }
    u16 {
        add: _mm_add_epi16,
        sub: _mm_sub_epi16,
        eq: _mm_cmpeq_epi16,
        gt: cmpgt_epu16,
        min: _mm_min_epu16,
        max: _mm_max_epu16,
        movemask: movemask_bytes,
        mul: _mm_mullo_epi16
    }
    i16 {
        add: _mm_add_epi16,
        sub: _mm_sub_epi16,
        eq: _mm_cmpeq_epi16,
        gt: _mm_cmpgt_epi16,
        min: _mm_min_epi16,
        max: _mm_max_epi16,
        movemask: movemask_bytes,
        mul: _mm_mullo_epi16
    }
    u32 {
        add: _mm_add_epi32,
        sub: _mm_sub_epi32,
        eq: _mm_cmpeq_epi32,
        gt: cmpgt_epu32,
        min: _mm_min_epu32,
        max: _mm_max_epu32,
        movemask: movemask_dwords,
        mul: _mm_mullo_epi32
    }
    i32 {
        add: _mm_add_epi32,
        sub: _mm_sub_epi32,
        eq: _mm_cmpeq_epi32,
        gt: _mm_cmpgt_epi32,
        min: _mm_min_epi32,
        max: _mm_max_epi32,
        movemask: movemask_dwords,
        mul: _mm_mullo_epi32
    }
}

macro_rules! int_abs_kernel {
    ($($lane:ty => $abs:ident),*) => {$(
        impl AbsKernel<W128> for $lane {
            #[inline(always)]
            fn abs(a: &Bytes16) -> Bytes16 {
                store(unsafe { $abs(load(a)) })
            }
        }
    )*};
}

int_abs_kernel!(i8 => _mm_abs_epi8, i16 => _mm_abs_epi16, i32 => _mm_abs_epi32);

impl Kernel<W128> for f32 {
    #[inline(always)]
    fn add(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_add_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn sub(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_sub_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn mul(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_mul_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn div(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_div_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn min(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_min_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn max(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_max_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn compare(op: Compare, a: &Bytes16, b: &Bytes16) -> Bytes16 {
        let (a, b) = (load_ps(a), load_ps(b));
        let mask = unsafe {
            match op {
                Compare::Eq => _mm_cmpeq_ps(a, b),
                Compare::Ne => _mm_cmpneq_ps(a, b),
                Compare::Gt => _mm_cmpgt_ps(a, b),
                Compare::Ge => _mm_cmpge_ps(a, b),
                Compare::Lt => _mm_cmplt_ps(a, b),
                Compare::Le => _mm_cmple_ps(a, b),
            }
        };
        store_ps(mask)
    }

    #[inline(always)]
    fn movemask(mask: &Bytes16) -> u32 {
        unsafe { _mm_movemask_ps(load_ps(mask)) as u32 }
    }
}

impl AbsKernel<W128> for f32 {
    #[inline(always)]
    fn abs(a: &Bytes16) -> Bytes16 {
        store_ps(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), load_ps(a)) })
    }
}

impl Kernel<W128> for f64 {
    #[inline(always)]
    fn add(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_add_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn sub(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_sub_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn mul(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_mul_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn div(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_div_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn min(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_min_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn max(a: &Bytes16, b: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_max_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn compare(op: Compare, a: &Bytes16, b: &Bytes16) -> Bytes16 {
        let (a, b) = (load_pd(a), load_pd(b));
        let mask = unsafe {
            match op {
                Compare::Eq => _mm_cmpeq_pd(a, b),
                Compare::Ne => _mm_cmpneq_pd(a, b),
                Compare::Gt => _mm_cmpgt_pd(a, b),
                Compare::Ge => _mm_cmpge_pd(a, b),
                Compare::Lt => _mm_cmplt_pd(a, b),
                Compare::Le => _mm_cmple_pd(a, b),
            }
        };
        store_pd(mask)
    }

    #[inline(always)]
    fn movemask(mask: &Bytes16) -> u32 {
        unsafe { _mm_movemask_pd(load_pd(mask)) as u32 }
    }
}

impl AbsKernel<W128> for f64 {
    #[inline(always)]
    fn abs(a: &Bytes16) -> Bytes16 {
        store_pd(unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), load_pd(a)) })
    }
}

#[cfg(test)]
mod tests {
    use super::super::portable;
    use super::*;

    #[test]
    fn test_unsigned_bytes_match_portable() {
        let a = Bytes16::new([0, 1, 127, 128, 255, 3, 9, 200, 0, 1, 127, 128, 255, 3, 9, 200]);
        let b = Bytes16::new([255, 1, 128, 127, 0, 3, 10, 100, 255, 1, 128, 127, 0, 3, 10, 100]);
        for op in [Compare::Eq, Compare::Ne, Compare::Gt, Compare::Ge, Compare::Lt, Compare::Le] {
            assert_eq!(
                <u8 as Kernel<W128>>::compare(op, &a, &b),
                portable::compare::<u8, W128>(op, &a, &b),
                "{:?}",
                op
            );
        }
        assert_eq!(<u8 as Kernel<W128>>::min(&a, &b), portable::map2::<u8, W128>(&a, &b, Ord::min));
    }

    #[test]
    fn test_abs_matches_portable() {
        let a = Bytes16::new([0x80, 0xFF, 1, 0x7F, 0, 0x81, 5, 0xFB, 0x80, 0xFF, 1, 0x7F, 0, 0x81, 5, 0xFB]);
        assert_eq!(
            <i8 as AbsKernel<W128>>::abs(&a),
            portable::map1::<i8, W128>(&a, i8::wrapping_abs)
        );
    }
}
