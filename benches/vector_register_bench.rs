use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lanestr::simd::{F32x8, I64x4, U16x16, U8x32, Width, W256};

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("arithmetic/{}", W256::BACKEND));

    let a = U8x32::splat(3);
    let b = U8x32::splat(5);
    group.bench_function("U8x32::add", |bench| bench.iter(|| black_box(a) + black_box(b)));

    let x = U16x16::splat(300);
    let y = U16x16::splat(7);
    group.bench_function("U16x16::mul", |bench| bench.iter(|| black_box(x) * black_box(y)));

    let f = F32x8::splat(1.25);
    let g = F32x8::splat(0.5);
    group.bench_function("F32x8::div", |bench| bench.iter(|| black_box(f) / black_box(g)));

    let i = I64x4::from_array([-1, 2, -3, 4]);
    group.bench_function("I64x4::abs", |bench| bench.iter(|| black_box(i).abs()));
    group.bench_function("I64x4::max", |bench| bench.iter(|| black_box(i).max(black_box(I64x4::zero()))));

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("compare/{}", W256::BACKEND));

    let a = U8x32::splat(b'a');
    let b = U8x32::splat(b'b');
    group.bench_function("U8x32::simd_eq", |bench| bench.iter(|| black_box(a).simd_eq(black_box(b)).any()));
    group.bench_function("U8x32::lanes_gt", |bench| bench.iter(|| black_box(a).lanes_gt(black_box(b))));

    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift");
    let v = U8x32::splat(0xAB);

    for k in [1usize, 7, 16, 31] {
        group.bench_function(format!("U8x32 << {}", k), |bench| {
            bench.iter(|| black_box(v) << black_box(k))
        });
    }
    group.bench_function("F32x8::shuffle_right(3)", |bench| {
        bench.iter(|| black_box(F32x8::splat(1.0)).shuffle_right(black_box(3)))
    });

    group.finish();
}

criterion_group!(benches, bench_arithmetic, bench_compare, bench_shift);
criterion_main!(benches);
