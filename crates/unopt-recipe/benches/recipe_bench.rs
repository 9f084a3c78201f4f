//! Benchmarks for the unoptimization pipeline.
//!
//! Run with: cargo bench -p unopt-recipe

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use unopt_gen::random_two_qubit_circuit_with_rng;
use unopt_recipe::{
    DecompositionMethod, UnoptimizationStrategy, decompose, unoptimize_circuit_with_rng,
};

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    let circuit = random_two_qubit_circuit_with_rng(6, 10, StdRng::seed_from_u64(0)).unwrap();

    for method in [
        DecompositionMethod::Default,
        DecompositionMethod::Kak,
        DecompositionMethod::Basis,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(method),
            &method,
            |b, &method| {
                b.iter(|| decompose(black_box(&circuit), method).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_unoptimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("unoptimize");
    let circuit = random_two_qubit_circuit_with_rng(6, 10, StdRng::seed_from_u64(0)).unwrap();
    let decomposed = decompose(&circuit, DecompositionMethod::Kak).unwrap();

    for iterations in [1i64, 2, 3] {
        group.bench_with_input(
            BenchmarkId::new("concatenated", iterations),
            &iterations,
            |b, &k| {
                b.iter(|| {
                    unoptimize_circuit_with_rng(
                        black_box(&decomposed),
                        k,
                        UnoptimizationStrategy::Concatenated,
                        StdRng::seed_from_u64(0),
                    )
                    .unwrap()
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("random", iterations),
            &iterations,
            |b, &k| {
                b.iter(|| {
                    unoptimize_circuit_with_rng(
                        black_box(&decomposed),
                        k,
                        UnoptimizationStrategy::Random,
                        StdRng::seed_from_u64(0),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decompose, bench_unoptimize);
criterion_main!(benches);
