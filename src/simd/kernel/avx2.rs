//! AVX2 kernels for 256-bit registers
//!
//! Only compiled when the target enables AVX2, so every intrinsic used here is
//! available and the `unsafe` blocks only discharge that obligation. Loads and
//! stores are aligned: [`Bytes32`] is 32-byte aligned.
//!
//! Integer division and 8/64-bit integer multiplication have no AVX2
//! instruction and keep the portable kernels. Float `min`/`max` return the
//! second operand when either lane is NaN, as the instructions do.

use super::{AbsKernel, Compare, Kernel};
use crate::simd::width::{Bytes32, W256};
use std::arch::x86_64::*;

#[inline(always)]
fn load(bytes: &Bytes32) -> __m256i {
    unsafe { _mm256_load_si256(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store(vector: __m256i) -> Bytes32 {
    let mut out = Bytes32::ZERO;
    unsafe { _mm256_store_si256(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn load_ps(bytes: &Bytes32) -> __m256 {
    unsafe { _mm256_load_ps(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store_ps(vector: __m256) -> Bytes32 {
    let mut out = Bytes32::ZERO;
    unsafe { _mm256_store_ps(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn load_pd(bytes: &Bytes32) -> __m256d {
    unsafe { _mm256_load_pd(bytes.0.as_ptr().cast()) }
}

#[inline(always)]
fn store_pd(vector: __m256d) -> Bytes32 {
    let mut out = Bytes32::ZERO;
    unsafe { _mm256_store_pd(out.0.as_mut_ptr().cast(), vector) };
    out
}

#[inline(always)]
fn not(vector: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(vector, _mm256_set1_epi32(-1)) }
}

#[inline(always)]
fn movemask_bytes(mask: __m256i) -> u32 {
    unsafe { _mm256_movemask_epi8(mask) as u32 }
}

#[inline(always)]
fn movemask_dwords(mask: __m256i) -> u32 {
    unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(mask)) as u32 }
}

#[inline(always)]
fn movemask_qwords(mask: __m256i) -> u32 {
    unsafe { _mm256_movemask_pd(_mm256_castsi256_pd(mask)) as u32 }
}

// Unsigned ordering: flip the sign bit and use the signed compare.

#[inline(always)]
fn cmpgt_epu8(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let bias = _mm256_set1_epi8(i8::MIN);
        _mm256_cmpgt_epi8(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
    }
}

#[inline(always)]
fn cmpgt_epu16(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let bias = _mm256_set1_epi16(i16::MIN);
        _mm256_cmpgt_epi16(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
    }
}

#[inline(always)]
fn cmpgt_epu32(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let bias = _mm256_set1_epi32(i32::MIN);
        _mm256_cmpgt_epi32(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
    }
}

#[inline(always)]
fn cmpgt_epu64(a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        let bias = _mm256_set1_epi64x(i64::MIN);
        _mm256_cmpgt_epi64(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
    }
}

// No 64-bit min/max/abs before AVX-512: select through the compare mask.

#[inline(always)]
fn min_epi64(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_blendv_epi8(a, b, _mm256_cmpgt_epi64(a, b)) }
}

#[inline(always)]
fn max_epi64(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_blendv_epi8(b, a, _mm256_cmpgt_epi64(a, b)) }
}

#[inline(always)]
fn min_epu64(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_blendv_epi8(a, b, cmpgt_epu64(a, b)) }
}

#[inline(always)]
fn max_epu64(a: __m256i, b: __m256i) -> __m256i {
    unsafe { _mm256_blendv_epi8(b, a, cmpgt_epu64(a, b)) }
}

#[inline(always)]
fn abs_epi64(a: __m256i) -> __m256i {
    unsafe {
        let sign = _mm256_cmpgt_epi64(_mm256_setzero_si256(), a);
        _mm256_sub_epi64(_mm256_xor_si256(a, sign), sign)
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
        impl Kernel<W256> for $lane {
            #[inline(always)]
            fn add(a: &Bytes32, b: &Bytes32) -> Bytes32 {
                store(unsafe { $add(load(a), load(b)) })
            }

            #[inline(always)]
            fn sub(a: &Bytes32, b: &Bytes32) -> Bytes32 {
                store(unsafe { $sub(load(a), load(b)) })
            }

            $(
                #[inline(always)]
                fn mul(a: &Bytes32, b: &Bytes32) -> Bytes32 {
                    store(unsafe { $mul(load(a), load(b)) })
                }
            )?

            #[inline(always)]
            fn min(a: &Bytes32, b: &Bytes32) -> Bytes32 {
                store(unsafe { $min(load(a), load(b)) })
            }

            #[inline(always)]
            fn max(a: &Bytes32, b: &Bytes32) -> Bytes32 {
                store(unsafe { $max(load(a), load(b)) })
            }

            #[inline(always)]
            fn compare(op: Compare, a: &Bytes32, b: &Bytes32) -> Bytes32 {
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
            fn movemask(mask: &Bytes32) -> u32 {
                $movemask(load(mask))
            }
        }
    )*};
}

int_kernel! {
    u8 {
        add: _mm256_add_epi8,
        sub: _mm256_sub_epi8,
        eq: _mm256_cmpeq_epi8,
        gt: cmpgt_epu8,
        min: _mm256_min_epu8,
        max: _mm256_max_epu8,
        movemask: movemask_bytes
    }
    i8 {
        add: _mm256_add_epi8,
        sub: _mm256_sub_epi8,
        eq: _mm256_cmpeq_epi8,
        gt: _mm256_cmpgt_epi8,
        min: _mm256_min_epi8,
        max: _mm256_max_epi8,
        movemask: movemask_bytes
    }
    u16 {
        add: _mm256_add_epi16,
        sub: _mm256_sub_epi16,
        eq: _mm256_cmpeq_epi16,
        gt: cmpgt_epu16,
        min: _mm256_min_epu16,
        max: _mm256_max_epu16,
        movemask: movemask_bytes,
        mul: _mm256_mullo_epi16
    }
    i16 {
        add: _mm256_add_epi16,
        sub: _mm256_sub_epi16,
        eq: _mm256_cmpeq_epi16,
        gt: _mm256_cmpgt_epi16,
        min: _mm256_min_epi16,
        max: _mm256_max_epi16,
        movemask: movemask_bytes,
        mul: _mm256_mullo_epi16
    }
    u32 {
        add: _mm256_add_epi32,
        sub: _mm256_sub_epi32,
        eq: _mm256_cmpeq_epi32,
        gt: cmpgt_epu32,
        min: _mm256_min_epu32,
        max: _mm256_max_epu32,
        movemask: movemask_dwords,
        mul: _mm256_mullo_epi32
    }
    i32 {
        add: _mm256_add_epi32,
        sub: _mm256_sub_epi32,
        eq: _mm256_cmpeq_epi32,
        gt: _mm256_cmpgt_epi32,
        min: _mm256_min_epi32,
        max: _mm256_max_epi32,
        movemask: movemask_dwords,
        mul: _mm256_mullo_epi32
    }
    u64 {
        add: _mm256_add_epi64,
        sub: _mm256_sub_epi64,
        eq: _mm256_cmpeq_epi64,
        gt: cmpgt_epu64,
        min: min_epu64,
        max: max_epu64,
        movemask: movemask_qwords
    }
    i64 {
        add: _mm256_add_epi64,
        sub: _mm256_sub_epi64,
        eq: _mm256_cmpeq_epi64,
        gt: _mm256_cmpgt_epi64,
        min: min_epi64,
        max: max_epi64,
        movemask: movemask_qwords
    }
}

macro_rules! int_abs_kernel {
    ($($lane:ty => $abs:ident),*) => {$(
        impl AbsKernel<W256> for $lane {
            #[inline(always)]
            fn abs(a: &Bytes32) -> Bytes32 {
                store(unsafe { $abs(load(a)) })
            }
        }
    )*};
}

int_abs_kernel!(
    i8 => _mm256_abs_epi8,
    i16 => _mm256_abs_epi16,
    i32 => _mm256_abs_epi32,
    i64 => abs_epi64
);

impl Kernel<W256> for f32 {
    #[inline(always)]
    fn add(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_add_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn sub(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_sub_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn mul(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_mul_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn div(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_div_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn min(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_min_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn max(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_max_ps(load_ps(a), load_ps(b)) })
    }

    #[inline(always)]
    fn compare(op: Compare, a: &Bytes32, b: &Bytes32) -> Bytes32 {
        let (a, b) = (load_ps(a), load_ps(b));
        let mask = unsafe {
            match op {
                Compare::Eq => _mm256_cmp_ps(a, b, _CMP_EQ_OQ),
                Compare::Ne => _mm256_cmp_ps(a, b, _CMP_NEQ_UQ),
                Compare::Gt => _mm256_cmp_ps(a, b, _CMP_GT_OQ),
                Compare::Ge => _mm256_cmp_ps(a, b, _CMP_GE_OQ),
                Compare::Lt => _mm256_cmp_ps(a, b, _CMP_LT_OQ),
                Compare::Le => _mm256_cmp_ps(a, b, _CMP_LE_OQ),
            }
        };
        store_ps(mask)
    }

    #[inline(always)]
    fn movemask(mask: &Bytes32) -> u32 {
        unsafe { _mm256_movemask_ps(load_ps(mask)) as u32 }
    }
}

impl AbsKernel<W256> for f32 {
    #[inline(always)]
    fn abs(a: &Bytes32) -> Bytes32 {
        store_ps(unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), load_ps(a)) })
    }
}

impl Kernel<W256> for f64 {
    #[inline(always)]
    fn add(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_add_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn sub(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_sub_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn mul(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_mul_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn div(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_div_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn min(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_min_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn max(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_max_pd(load_pd(a), load_pd(b)) })
    }

    #[inline(always)]
    fn compare(op: Compare, a: &Bytes32, b: &Bytes32) -> Bytes32 {
        let (a, b) = (load_pd(a), load_pd(b));
        let mask = unsafe {
            match op {
                Compare::Eq => _mm256_cmp_pd(a, b, _CMP_EQ_OQ),
                Compare::Ne => _mm256_cmp_pd(a, b, _CMP_NEQ_UQ),
                Compare::Gt => _mm256_cmp_pd(a, b, _CMP_GT_OQ),
                Compare::Ge => _mm256_cmp_pd(a, b, _CMP_GE_OQ),
                Compare::Lt => _mm256_cmp_pd(a, b, _CMP_LT_OQ),
                Compare::Le => _mm256_cmp_pd(a, b, _CMP_LE_OQ),
            }
        };
        store_pd(mask)
    }

    #[inline(always)]
    fn movemask(mask: &Bytes32) -> u32 {
        unsafe { _mm256_movemask_pd(load_pd(mask)) as u32 }
    }
}

impl AbsKernel<W256> for f64 {
    #[inline(always)]
    fn abs(a: &Bytes32) -> Bytes32 {
        store_pd(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), load_pd(a)) })
    }
}
