//! Portable kernels
//!
//! Fixed trip-count loops over the lane view of a register. After inlining the
//! lane count is a constant and the compiler lowers these to whatever vector
//! instructions the target has.

use super::Compare;
use crate::simd::lane::Lane;
use crate::simd::width::{lanes, lanes_mut, Width};

#[inline(always)]
pub(super) fn map1<E: Lane, W: Width>(a: &W::Bytes, op: impl Fn(E) -> E) -> W::Bytes {
    let mut out = W::Bytes::default();
    for (dst, &x) in lanes_mut::<E, W>(&mut out).iter_mut().zip(lanes::<E, W>(a)) {
        *dst = op(x);
    }
    out
}

#[inline(always)]
pub(super) fn map2<E: Lane, W: Width>(
    a: &W::Bytes,
    b: &W::Bytes,
    op: impl Fn(E, E) -> E,
) -> W::Bytes {
    let mut out = W::Bytes::default();
    let dst = lanes_mut::<E, W>(&mut out);
    for ((dst, &x), &y) in dst.iter_mut().zip(lanes::<E, W>(a)).zip(lanes::<E, W>(b)) {
        *dst = op(x, y);
    }
    out
}

#[inline(always)]
pub(super) fn compare<E: Lane, W: Width>(op: Compare, a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
    let mut out = W::Bytes::default();
    let pairs = lanes::<E, W>(a).iter().zip(lanes::<E, W>(b));
    for (chunk, (&x, &y)) in out.as_mut().chunks_exact_mut(E::SIZE).zip(pairs) {
        let hit = match op {
            Compare::Eq => x == y,
            Compare::Ne => x != y,
            Compare::Gt => x > y,
            Compare::Ge => x >= y,
            Compare::Lt => x < y,
            Compare::Le => x <= y,
        };
        chunk.fill(if hit { 0xFF } else { 0 });
    }
    out
}

#[inline(always)]
pub(super) fn movemask<E: Lane, W: Width>(mask: &W::Bytes) -> u32 {
    let bytes = mask.as_ref();
    if E::SIZE <= 2 {
        bytes
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &byte)| acc | (u32::from(byte >> 7) << i))
    } else {
        let sign = if cfg!(target_endian = "little") { E::SIZE - 1 } else { 0 };
        bytes
            .chunks_exact(E::SIZE)
            .enumerate()
            .fold(0, |acc, (i, lane)| acc | (u32::from(lane[sign] >> 7) << i))
    }
}
