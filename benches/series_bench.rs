use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use step_series::algs::combine::combine;
use step_series::algs::reducer::Sum;
use step_series::data::series::Series;

fn random_series(n: usize, seed: u64) -> Series {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(-1_000_000i64..1_000_000), rng.gen_range(-5i64..5)))
        .collect()
}

fn bench_bulk_insert_then_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_insert_then_read");

    for &n in &[1_000usize, 100_000usize] {
        let mut rng = SmallRng::seed_from_u64(7);
        let keys: Vec<i64> = (0..n).map(|_| rng.gen_range(-1_000_000..1_000_000)).collect();

        group.bench_with_input(BenchmarkId::new("set_then_get", n), &n, |b, _| {
            b.iter(|| {
                let mut s = Series::new();
                for (i, &x) in keys.iter().enumerate() {
                    s.set(x, i as i64);
                }
                // first ordered read pays for the merge
                black_box(s.get(0));
            });
        });

        let s = random_series(n, 11);
        let _ = s.xs();
        group.bench_with_input(BenchmarkId::new("get_merged", n), &n, |b, _| {
            b.iter(|| {
                for &x in keys.iter().take(1_000) {
                    black_box(s.get(x + 1));
                }
            });
        });
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    for &n in &[1_000usize, 10_000usize] {
        let inputs: Vec<Series> = (0..4).map(|i| random_series(n, i)).collect();
        let refs: Vec<&Series> = inputs.iter().collect();
        group.bench_with_input(BenchmarkId::new("sum_4", n), &n, |b, _| {
            b.iter(|| {
                let mut out = combine(&Sum, &refs);
                black_box(out.compact());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bulk_insert_then_read, bench_combine);
criterion_main!(benches);
