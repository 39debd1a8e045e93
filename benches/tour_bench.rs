//! Criterion benchmarks for the knight's tour solvers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knights_tour::backtrack::BacktrackSolver;
use knights_tour::ga::{decode, GaConfig, GaRunner, Genome, HaltPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_backtrack(c: &mut Criterion) {
    let solver = BacktrackSolver::default();
    c.bench_function("backtrack_from_origin", |b| {
        b.iter(|| black_box(solver.solve()))
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let genomes: Vec<Genome> = (0..64).map(|_| Genome::random(&mut rng)).collect();

    let mut group = c.benchmark_group("decode");
    for forward in [true, false] {
        group.bench_with_input(
            BenchmarkId::from_parameter(if forward { "forward" } else { "backward" }),
            &forward,
            |b, &forward| {
                b.iter(|| {
                    for g in &genomes {
                        let mut g = g.clone();
                        black_box(decode(&mut g, forward, HaltPolicy::Stop));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for (pop, gen) in [(50, 50), (100, 100)] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}_g{gen}"), pop),
            &config,
            |b, config| {
                b.iter(|| black_box(GaRunner::run(config)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_backtrack, bench_decode, bench_ga);
criterion_main!(benches);
