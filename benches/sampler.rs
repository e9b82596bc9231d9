use criterion::{criterion_group, criterion_main, Criterion};
use piapprox::{count_hits, count_hits_batched, Estimator, EstimatorConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const SAMPLES: u64 = 100_000;

fn bench_strategies(c: &mut Criterion) {
    c.bench_function("sampler/scalar", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7777);
        b.iter(|| black_box(count_hits(&mut rng, SAMPLES)))
    });

    c.bench_function("sampler/batched", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7777);
        b.iter(|| black_box(count_hits_batched(&mut rng, SAMPLES).unwrap()))
    });
}

fn bench_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");
    group.sample_size(10);

    for workers in [1, 2, 4] {
        let config = EstimatorConfig::new(1_000_000, workers)
            .unwrap()
            .with_seed(Some(7777));
        let estimator = Estimator::new(config).unwrap();
        group.bench_function(format!("workers/{workers}"), |b| {
            b.iter(|| black_box(estimator.run().unwrap().pi))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_estimator);
criterion_main!(benches);
