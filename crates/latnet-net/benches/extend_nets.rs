use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use latnet_net::{DigitalNet, NetConstruction, Sobol, SobolNet};

fn bench_extend_size(c: &mut Criterion) {
    let base = SobolNet::new(16, 10).unwrap();
    c.bench_function("sobol_extend_size_10_to_30", |b| {
        b.iter_batched(
            || base.clone(),
            |mut net| net.extend_size(30, 30).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_extend_dimension(c: &mut Criterion) {
    let base = SobolNet::new(20, 24).unwrap();
    let gen = Sobol::default_gen_values(21, &24).unwrap().pop().unwrap();
    c.bench_function("sobol_extend_dimension_20_to_21", |b| {
        b.iter(|| {
            let _ = base.extend_dimension(gen.clone()).unwrap();
        })
    });
}

criterion_group!(benches, bench_extend_size, bench_extend_dimension);
criterion_main!(benches);
