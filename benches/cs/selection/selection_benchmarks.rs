use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kselect::selection::{median_of_medians, quickselect};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_input(len: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect()
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_random");
    for &len in &[100usize, 1_000, 10_000] {
        let arr = random_input(len);
        let k = len.div_ceil(2);
        group.bench_with_input(BenchmarkId::new("median_of_medians", len), &arr, |b, arr| {
            b.iter(|| median_of_medians(black_box(arr), k))
        });
        group.bench_with_input(BenchmarkId::new("quickselect", len), &arr, |b, arr| {
            b.iter(|| quickselect(black_box(arr), k))
        });
    }
    group.finish();
}

fn bench_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_sorted");
    for &len in &[100usize, 500, 1_000] {
        let arr: Vec<i64> = (0..len as i64).collect();
        group.bench_with_input(BenchmarkId::new("median_of_medians", len), &arr, |b, arr| {
            b.iter(|| median_of_medians(black_box(arr), len))
        });
        group.bench_with_input(BenchmarkId::new("quickselect", len), &arr, |b, arr| {
            b.iter(|| quickselect(black_box(arr), len))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random, bench_sorted);
criterion_main!(benches);
