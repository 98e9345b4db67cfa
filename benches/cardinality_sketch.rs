use cardinality_sketch::{ranhash, CardinalitySketch};
use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};

/// Insert and estimate are benchmarked at cardinalities doubling from 0 to
/// `MAX_CARDINALITY`, crossing the sparse-to-dense switch along the way.
const MAX_CARDINALITY: u64 = 1 << 17;
const PRECISION: u8 = 14;

criterion_group!(benches, benchmark);
criterion_main!(benches);

fn benchmark(c: &mut Criterion) {
    let cardinalities: Vec<u64> = std::iter::once(0)
        .chain((0..).map(|exp| 1 << exp))
        .take_while(|&cardinality| cardinality <= MAX_CARDINALITY)
        .collect();

    let mut group = c.benchmark_group("insert");
    for &cardinality in &cardinalities {
        group.throughput(Throughput::Elements(cardinality.max(1)));
        bench_insert(&mut group, cardinality);
    }
    group.finish();

    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(1));
    for &cardinality in &cardinalities {
        bench_estimate(&mut group, cardinality);
    }
    group.finish();

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1));
    bench_merge(&mut group);
    group.finish();
}

fn bench_insert(group: &mut BenchmarkGroup<WallTime>, cardinality: u64) {
    group.bench_with_input(
        BenchmarkId::from_parameter(cardinality),
        &cardinality,
        |b, &cardinality| {
            b.iter(|| {
                let mut sketch = CardinalitySketch::new(PRECISION).unwrap();
                for item in 0..black_box(cardinality) {
                    sketch.add(black_box(item));
                }
                sketch
            });
        },
    );
}

fn bench_estimate(group: &mut BenchmarkGroup<WallTime>, cardinality: u64) {
    let mut sketch = CardinalitySketch::new(PRECISION).unwrap();
    for item in 0..cardinality {
        sketch.add(item);
    }
    group.bench_with_input(
        BenchmarkId::new("heule", cardinality),
        &sketch,
        |b, sketch| b.iter(|| black_box(sketch).cardinality()),
    );
    group.bench_with_input(
        BenchmarkId::new("ertl", cardinality),
        &sketch,
        |b, sketch| b.iter(|| black_box(sketch).ertl_cardinality()),
    );
}

fn bench_merge(group: &mut BenchmarkGroup<WallTime>) {
    let mut lhs = CardinalitySketch::with_mixer(PRECISION, false, ranhash).unwrap();
    let mut rhs = CardinalitySketch::with_mixer(PRECISION, false, ranhash).unwrap();
    for item in 0..MAX_CARDINALITY {
        lhs.add(item);
        rhs.add(item + MAX_CARDINALITY / 2);
    }
    group.bench_function("dense_dense", |b| {
        b.iter(|| {
            let mut merged = lhs.clone();
            merged.merge(black_box(&rhs)).unwrap();
            merged
        });
    });
}
