//! Degree-constrained reconstruction benchmarks.
//!
//! Targets are the degrees of the synthetic graph itself, so each run
//! allocates the full edge budget against a noisy probability matrix.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use gene_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{SyntheticConfig, SyntheticGraph},
};
use gene_core::{DegreeTargets, GraphSynthesizer, Reconstructor};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Expected mean degree of the synthetic graphs.
const MEAN_DEGREE: usize = 6;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 250, 500];

fn reconstruct_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("reconstruct");
    group.sample_size(10);
    let reconstructor = Reconstructor::new();

    for &node_count in NODE_COUNTS {
        let synthetic = SyntheticGraph::generate(&SyntheticConfig {
            node_count,
            mean_degree: MEAN_DEGREE,
            seed: SEED,
        })?;
        let targets = DegreeTargets::by_identity(synthetic.graph().degrees());
        let params = GraphBenchParams {
            node_count,
            mean_degree: MEAN_DEGREE,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &(&targets, &synthetic),
            |b, &(targets, synthetic)| {
                b.iter(|| reconstructor.reconstruct(targets, synthetic.probability()));
            },
        );
    }

    group.finish();
    Ok(())
}

fn synthesize_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("synthesize");
    group.sample_size(10);
    let synthesizer = GraphSynthesizer::default();

    for &node_count in NODE_COUNTS {
        let synthetic = SyntheticGraph::generate(&SyntheticConfig {
            node_count,
            mean_degree: MEAN_DEGREE,
            seed: SEED,
        })?;
        let params = GraphBenchParams {
            node_count,
            mean_degree: MEAN_DEGREE,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &synthetic,
            |b, synthetic| {
                b.iter(|| synthesizer.synthesize(synthetic.graph(), synthetic.probability()));
            },
        );
    }

    group.finish();
    Ok(())
}

fn reconstruct(c: &mut Criterion) {
    if let Err(err) = reconstruct_impl(c) {
        panic!("reconstruct benchmark setup failed: {err}");
    }
}

fn synthesize(c: &mut Criterion) {
    if let Err(err) = synthesize_impl(c) {
        panic!("synthesize benchmark setup failed: {err}");
    }
}

criterion_group!(benches, reconstruct, synthesize);
criterion_main!(benches);
