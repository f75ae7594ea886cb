use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use utils::distance::l2::L2DistanceCalculator;
use utils::test_utils::generate_random_vector;

fn bench_l2_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("L2 Distance");
    for size in [2, 8, 16, 32, 64, 128, 256, 512, 1024].iter() {
        let a = generate_random_vector(*size);
        let b = generate_random_vector(*size);

        group.bench_with_input(BenchmarkId::new("Distance", *size), &size, |bencher, _| {
            bencher.iter(|| L2DistanceCalculator::calculate(black_box(&a), black_box(&b)))
        });

        group.bench_with_input(BenchmarkId::new("Squared", *size), &size, |bencher, _| {
            bencher.iter(|| L2DistanceCalculator::calculate_squared(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_l2_distance);
criterion_main!(benches);
