//! Contract tests for vector registers
//!
//! These run against whichever kernels the build selected, so running them
//! with and without `--features portable` (and with `-C target-cpu=native`)
//! checks that every backend agrees.

use lanestr::simd::*;

// =============================================================================
// COMPARISON MASKS
// =============================================================================

macro_rules! mask_contract {
    ($($name:ident: $ty:ty => $a:expr, $b:expr;)*) => {$(
        #[test]
        fn $name() {
            let a = <$ty>::splat($a);
            assert_eq!(a.simd_eq(a).bits(), <$ty>::COMPARISON_MASK);
            assert!(a.simd_eq(a).all());

            let mut b = a;
            b[0] = $b;
            let eq = a.simd_eq(b);
            assert!(eq.any(), "other lanes still match");
            assert!(!eq.all(), "lane 0 differs");
            assert_ne!(eq.bits(), <$ty>::COMPARISON_MASK);
            assert_eq!(a.simd_ne(b).bits() | eq.bits(), <$ty>::COMPARISON_MASK);
        }
    )*};
}

mask_contract! {
    mask_u8x16: U8x16 => 7, 8;
    mask_u8x32: U8x32 => 7, 8;
    mask_i8x32: I8x32 => -7, 8;
    mask_u16x16: U16x16 => 700, 8;
    mask_i16x8: I16x8 => -700, 8;
    mask_u32x8: U32x8 => 70_000, 8;
    mask_i32x4: I32x4 => -70_000, 8;
    mask_u64x4: U64x4 => 1 << 40, 8;
    mask_i64x2: I64x2 => -(1 << 40), 8;
    mask_f32x8: F32x8 => 1.5, 2.5;
    mask_f64x2: F64x2 => -1.5, 2.5;
}

#[test]
fn test_two_byte_lanes_set_two_bits() {
    let a = U16x8::zero();
    let mut b = a;
    b[3] = 1;
    let ne = a.simd_ne(b);
    assert_eq!(ne.bits(), 0b11 << 6);
    assert_eq!(ne.count(), 2);
}

#[test]
fn test_signedness_of_comparisons() {
    let small = U8x32::splat(1);
    let big = U8x32::splat(0xF0);
    assert!(big.simd_gt(small).all());
    assert!(I8x32::splat(-16).simd_lt(I8x32::splat(1)).all());

    assert!(U64x4::splat(u64::MAX).simd_gt(U64x4::splat(1)).all());
    assert!(I64x4::splat(-1).simd_lt(I64x4::splat(1)).all());
    assert!(U32x8::splat(u32::MAX).simd_ge(U32x8::splat(u32::MAX)).all());
    assert!(I16x16::splat(-3).simd_le(I16x16::splat(-3)).all());
}

// =============================================================================
// ARITHMETIC AND MIN/MAX
// =============================================================================

#[test]
fn test_wrapping_integer_arithmetic() {
    assert_eq!(U8x32::splat(250) + U8x32::splat(10), U8x32::splat(4));
    assert_eq!(U16x16::splat(0) - U16x16::splat(1), U16x16::splat(u16::MAX));
    assert_eq!(I32x8::splat(i32::MAX) + I32x8::splat(1), I32x8::splat(i32::MIN));
    assert_eq!(U32x4::splat(3) * U32x4::splat(5), U32x4::splat(15));
    assert_eq!(I64x4::splat(-9) / I64x4::splat(2), I64x4::splat(-4));
    assert_eq!(U8x16::splat(16) * U8x16::splat(16), U8x16::zero());
}

#[test]
fn test_float_arithmetic() {
    let a = F32x8::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    let half = a / F32x8::splat(2.0);
    assert_eq!(half.lane(7), 4.0);
    assert_eq!(a - a, F32x8::zero());
    assert_eq!((F64x2::splat(0.25) + F64x2::splat(0.5)).as_lanes(), &[0.75, 0.75]);
}

#[test]
fn test_min_max_per_lane_type() {
    let a = I8x16::from_array([-128, 127, 0, -1, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5]);
    let b = I8x16::splat(0);
    assert_eq!(a.min(b).as_lanes()[..4], [-128, 0, 0, -1]);
    assert_eq!(a.max(b).as_lanes()[..4], [0, 127, 0, 0]);

    let u = U16x8::from_array([0, 65535, 1, 2, 3, 4, 5, 6]);
    assert_eq!(u.max(U16x8::splat(3)).as_lanes(), &[3, 65535, 3, 3, 3, 4, 5, 6]);

    let big = U64x4::from_array([u64::MAX, 0, 5, 1 << 63]);
    assert_eq!(big.min(U64x4::splat(5)).as_lanes(), &[5, 0, 5, 5]);
    let signed = I64x4::from_array([i64::MIN, -1, 1, i64::MAX]);
    assert_eq!(signed.max(I64x4::zero()).as_lanes(), &[0, 0, 1, i64::MAX]);
}

#[test]
fn test_abs_on_signed_and_float_lanes() {
    assert_eq!(I8x32::splat(i8::MIN).abs(), I8x32::splat(i8::MIN));
    assert_eq!(I16x8::splat(-300).abs(), I16x8::splat(300));
    assert_eq!(I64x4::from_array([-1, 2, i64::MIN, -7]).abs().as_lanes(), &[1, 2, i64::MIN, 7]);
    assert_eq!(I64x2::splat(-42).abs(), I64x2::splat(42));
    assert_eq!(F64x4::splat(-0.0).abs().lane(0).to_bits(), 0.0f64.to_bits());
}

// =============================================================================
// SHIFTS
// =============================================================================

#[test]
fn test_shift_any_amount_every_width() {
    let lanes: [u8; 32] = std::array::from_fn(|i| i as u8 + 1);
    let v = U8x32::from_array(lanes);
    for k in 0..=40usize {
        let left = v << k;
        let right = v >> k;
        for i in 0..32 {
            let expect_left = if i >= k { i as u8 + 1 - k as u8 } else { 0 };
            let expect_right = if i + k < 32 { (i + k) as u8 + 1 } else { 0 };
            assert_eq!(left.lane(i), expect_left, "<< {} lane {}", k, i);
            assert_eq!(right.lane(i), expect_right, ">> {} lane {}", k, i);
        }
    }
}

#[test]
fn test_shift_is_lane_granular() {
    let v = F64x4::from_array([1.0, 2.0, 3.0, 4.0]);
    assert_eq!((v << 1).as_lanes(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(v.shuffle_right(3).as_lanes(), &[4.0, 0.0, 0.0, 0.0]);
    assert_eq!(v.shuffle_left(-1), v >> 1);
}

// =============================================================================
// CONSTRUCTION AND ACCESS
// =============================================================================

#[test]
fn test_construction() {
    assert_eq!(I32x4::default(), I32x4::zero());
    let lanes: [u16; 16] = std::array::from_fn(|i| i as u16 * 3);
    let v = U16x16::from_array(lanes);
    assert_eq!(v.lane(5), 15);
    assert_eq!(v.as_lanes().len(), U16x16::LANES);
    assert_eq!(U64x2::try_from_slice(&[1, 2]).map(|v| v.lane(1)), Some(2));
    assert!(U64x2::try_from_slice(&[1, 2, 3]).is_none());

    let raw = v.into_raw();
    assert_eq!(VectorRegister::<u16, W256>::from_raw(raw), v);
}

#[test]
fn test_lane_mutation() {
    let mut v = I16x8::zero();
    v[2] = -5;
    v.as_lanes_mut()[7] = 9;
    assert_eq!(v.as_lanes(), &[0, 0, -5, 0, 0, 0, 0, 9]);
}

#[test]
fn test_registers_are_send_sync_copy() {
    fn assert_traits<T: Send + Sync + Copy + 'static>() {}
    assert_traits::<U8x32>();
    assert_traits::<F64x2>();
    assert_traits::<lanestr::FixedStr>();
}
