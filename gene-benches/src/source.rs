//! Seeded synthetic inputs for benchmarking.
//!
//! [`SyntheticGraph`] pairs an Erdős–Rényi style random graph with a noisy
//! probability matrix that scores real edges above non-edges on average, the
//! shape a trained link predictor would produce.

use gene_core::{Graph, ProbabilityMatrix};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested node count was below two.
    #[error("node count must be at least two")]
    TooFewNodes,
    /// The requested mean degree cannot be reached without self-loops.
    #[error("mean degree {mean_degree} is not below node count {node_count}")]
    DegreeTooHigh {
        /// Requested mean degree.
        mean_degree: usize,
        /// Requested node count.
        node_count: usize,
    },
    /// The generator produced an invalid graph or matrix.
    #[error("generated input was rejected: {0}")]
    Rejected(String),
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Expected mean degree.
    pub mean_degree: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A random graph with a matching noisy probability matrix.
///
/// # Examples
///
/// ```
/// use gene_benches::source::{SyntheticConfig, SyntheticGraph};
///
/// let config = SyntheticConfig { node_count: 20, mean_degree: 4, seed: 42 };
/// let synthetic = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(synthetic.graph().node_count(), 20);
/// assert_eq!(synthetic.probability().node_count(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    graph: Graph,
    probability: ProbabilityMatrix,
}

impl SyntheticGraph {
    /// Generates the graph and matrix eagerly from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewNodes`] for fewer than two nodes and
    /// [`SyntheticError::DegreeTooHigh`] when `mean_degree` is not below
    /// `node_count`.
    #[expect(
        clippy::float_arithmetic,
        reason = "edge probability and score noise are floating-point quantities"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "node counts in benchmarks are far below f64 precision limits"
    )]
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.node_count < 2 {
            return Err(SyntheticError::TooFewNodes);
        }
        if config.mean_degree >= config.node_count {
            return Err(SyntheticError::DegreeTooHigh {
                mean_degree: config.mean_degree,
                node_count: config.node_count,
            });
        }

        let edge_probability = config.mean_degree as f64 / (config.node_count - 1) as f64;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut pairs = Vec::new();
        for source in 0..config.node_count {
            for target in (source + 1)..config.node_count {
                if rng.gen_bool(edge_probability) {
                    pairs.push((source, target));
                }
            }
        }
        let graph = Graph::from_edges(config.node_count, pairs)
            .map_err(|err| SyntheticError::Rejected(err.to_string()))?;

        let mut noise = SmallRng::seed_from_u64(config.seed.wrapping_add(1));
        let mut upper = vec![0.0_f64; config.node_count.saturating_mul(config.node_count)];
        for source in 0..config.node_count {
            for target in (source + 1)..config.node_count {
                let base = if graph.are_adjacent(source, target) { 0.6 } else { 0.2 };
                let score = base + noise.gen_range(0.0..0.4);
                if let Some(slot) = upper.get_mut(source * config.node_count + target) {
                    *slot = score;
                }
            }
        }
        let node_count = config.node_count;
        let probability = ProbabilityMatrix::from_fn(node_count, |row, col| {
            let index = row.min(col) * node_count + row.max(col);
            if row == col {
                0.0
            } else {
                upper.get(index).copied().unwrap_or(0.0)
            }
        })
        .map_err(|err| SyntheticError::Rejected(err.to_string()))?;

        Ok(Self { graph, probability })
    }

    /// The generated graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Noisy link probabilities aligned with [`Self::graph`].
    #[must_use]
    pub const fn probability(&self) -> &ProbabilityMatrix {
        &self.probability
    }
}
