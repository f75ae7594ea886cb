use clustering::KMeans;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use utils::test_utils::generate_blobs;

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("K-Means");
    let dimension = 16;
    let centers = (0..8)
        .map(|i| vec![(i * 10) as f64; dimension])
        .collect::<Vec<_>>();

    for num_datapoints in [1000, 10000].iter() {
        let dataset = generate_blobs(&centers, *num_datapoints, 3.0, 42);
        group.bench_with_input(
            BenchmarkId::new("kmeans", num_datapoints),
            num_datapoints,
            |bencher, _| {
                bencher.iter(|| {
                    let mut kmeans =
                        KMeans::with_rng(8, 20, dataset.clone(), StdRng::seed_from_u64(0))
                            .expect("Valid configuration");
                    black_box(kmeans.run()).expect("K-means run should succeed");
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
