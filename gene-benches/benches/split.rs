//! Connectivity-preserving edge split benchmarks.
//!
//! Compares the split with and without the connectivity guard; the guarded
//! run pays one reachability search per removal.
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
use gene_core::{SplitConfig, split_edges};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Expected mean degree of the synthetic graphs.
const MEAN_DEGREE: usize = 8;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 500, 1_000];

fn split_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("split_edges");
    group.sample_size(10);

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

        for preserve in [true, false] {
            let config = SplitConfig::new(0.1, 0.05)?
                .with_test_negative_ratio(1)
                .with_train_negative_ratio(1)
                .with_preserve_connectivity(preserve)
                .with_rng_seed(SEED);
            let id = if preserve { "guarded" } else { "unguarded" };

            group.bench_with_input(
                BenchmarkId::new(id, &params),
                &(&synthetic, &config),
                |b, &(synthetic, config)| {
                    b.iter(|| split_edges(synthetic.graph(), config));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn split(c: &mut Criterion) {
    if let Err(err) = split_impl(c) {
        panic!("split benchmark setup failed: {err}");
    }
}

criterion_group!(benches, split);
criterion_main!(benches);
