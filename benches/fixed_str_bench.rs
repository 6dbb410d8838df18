use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lanestr::{fixed_str, FixedStr};

fn bench_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("length");

    for text in ["", "hello", "a string of thirty-one bytes!!!"] {
        let fixed = FixedStr::try_from(text).unwrap();
        let owned = text.to_string();

        group.bench_with_input(BenchmarkId::new("FixedStr::len", text.len()), &fixed, |b, s| {
            b.iter(|| black_box(s).len())
        });
        group.bench_with_input(BenchmarkId::new("CStr scan", text.len()), fixed.raw_bytes(), |b, raw| {
            b.iter(|| black_box(raw).iter().position(|&byte| byte == 0))
        });
        group.bench_with_input(BenchmarkId::new("String::len", text.len()), &owned, |b, s| {
            b.iter(|| black_box(s).len())
        });
    }

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    let head = fixed_str!("hello");
    let tail = fixed_str!(", world");

    group.bench_function("FixedStr::append", |b| {
        b.iter(|| {
            let mut s = black_box(head);
            let _ = s.append(black_box(&tail));
            s
        })
    });
    group.bench_function("FixedStr::prepend", |b| {
        b.iter(|| {
            let mut s = black_box(tail);
            let _ = s.prepend(black_box(&head));
            s
        })
    });
    group.bench_function("String::push_str", |b| {
        b.iter(|| {
            let mut s = String::from(black_box("hello"));
            s.push_str(black_box(", world"));
            s
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let haystack = fixed_str!("the quick brown fox jumps over");
    let needle = fixed_str!("over");
    let missing = fixed_str!("lazy");
    let haystack_str = "the quick brown fox jumps over";

    group.bench_function("FixedStr::contains/hit", |b| {
        b.iter(|| black_box(&haystack).contains(black_box(&needle)))
    });
    group.bench_function("FixedStr::contains/miss", |b| {
        b.iter(|| black_box(&haystack).contains(black_box(&missing)))
    });
    group.bench_function("str::contains/hit", |b| {
        b.iter(|| black_box(haystack_str).contains(black_box("over")))
    });

    group.finish();
}

fn bench_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("case");
    let text = fixed_str!("Mixed Case Text With 31 Bytes.");

    group.bench_function("FixedStr::to_ascii_uppercase", |b| {
        b.iter(|| black_box(&text).to_ascii_uppercase())
    });
    group.bench_function("str::to_ascii_uppercase", |b| {
        b.iter(|| black_box("Mixed Case Text With 31 Bytes.").to_ascii_uppercase())
    });

    group.finish();
}

criterion_group!(benches, bench_length, bench_append, bench_search, bench_case);
criterion_main!(benches);
