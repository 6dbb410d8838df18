//! Concurrent lane shifts
//!
//! Each shift uses its own scratch buffer. Many threads shifting different
//! values at once must each get their own result back.

use lanestr::simd::U8x32;
use lanestr::{fixed_str, FixedStr};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;
const ROUNDS: usize = 2_000;

#[test]
fn test_concurrent_shifts_do_not_interfere() {
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let value = U8x32::splat(t as u8 + 1);
                barrier.wait();
                for round in 0..ROUNDS {
                    let k = round % 33;
                    let shifted = value << k;
                    for i in 0..32 {
                        let expected = if i < k { 0 } else { t as u8 + 1 };
                        assert_eq!(shifted.lane(i), expected, "thread {} shift {}", t, k);
                    }
                    assert_eq!(shifted >> k << k, shifted);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_string_building() {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            thread::spawn(move || {
                let tag = FixedStr::try_from(format!("t{:02}", t).as_str()).unwrap();
                for _ in 0..ROUNDS {
                    let mut s = tag;
                    let _ = s.append(&fixed_str!("-"));
                    let _ = s.append(&tag);
                    assert_eq!(s.to_string(), format!("t{:02}-t{:02}", t, t));
                    assert_eq!(s.remove_from_start(4), 4);
                    assert_eq!(s, tag);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
