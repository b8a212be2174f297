//! Connectivity-preserving train/validation/test edge splits.
//!
//! [`split_edges`] holds out a fraction of a graph's edges for testing and
//! validation without increasing its number of connected components, then
//! draws matching non-edges for each split. Removable edges are found by a
//! seeded shuffle followed by a single greedy scan; an edge whose removal
//! would separate its endpoints stays in the training graph.

mod config;
mod negatives;

use std::{collections::HashSet, fmt};

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{info, instrument, trace, warn};

use crate::{
    Result,
    error::GeneError,
    graph::{Edge, Graph},
};

pub use self::config::SplitConfig;
use self::negatives::NegativeSampler;

/// Identifies one of the three edge splits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SplitKind {
    /// Edges retained for training.
    Train,
    /// Edges held out for model selection.
    Validation,
    /// Edges held out for final evaluation.
    Test,
}

impl SplitKind {
    /// All splits, in the order negatives are sampled.
    pub const SAMPLING_ORDER: [Self; 3] = [Self::Test, Self::Validation, Self::Train];

    /// Stable lowercase name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested versus returned held-out edge counts.
///
/// A split is degraded when the graph lacked enough removable edges to meet
/// the requested sizes. Degraded splits are still valid results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SplitShortfall {
    /// Test edges requested.
    pub test_requested: usize,
    /// Test edges returned.
    pub test_returned: usize,
    /// Validation edges requested.
    pub validation_requested: usize,
    /// Validation edges returned.
    pub validation_returned: usize,
}

impl SplitShortfall {
    /// Test edges that could not be held out.
    #[must_use]
    pub const fn missing_test(&self) -> usize {
        self.test_requested.saturating_sub(self.test_returned)
    }

    /// Validation edges that could not be held out.
    #[must_use]
    pub const fn missing_validation(&self) -> usize {
        self.validation_requested
            .saturating_sub(self.validation_returned)
    }

    /// Returns `true` when either split is smaller than requested.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.missing_test() > 0 || self.missing_validation() > 0
    }
}

/// Result of [`split_edges`].
#[derive(Clone, Debug)]
pub struct EdgeSplit {
    train_graph: Graph,
    train: Vec<Edge>,
    validation: Vec<Edge>,
    test: Vec<Edge>,
    train_negatives: Vec<Edge>,
    validation_negatives: Vec<Edge>,
    test_negatives: Vec<Edge>,
    original_components: usize,
    shortfall: SplitShortfall,
}

impl EdgeSplit {
    /// Graph of retained training edges over the original node set.
    #[must_use]
    #[rustfmt::skip]
    pub const fn train_graph(&self) -> &Graph { &self.train_graph }

    /// Dense adjacency matrix of the training graph.
    #[must_use]
    pub fn train_adjacency(&self) -> Vec<Vec<u8>> {
        self.train_graph.to_dense()
    }

    /// Positive edges of `kind`.
    #[must_use]
    pub fn positives(&self, kind: SplitKind) -> &[Edge] {
        match kind {
            SplitKind::Train => &self.train,
            SplitKind::Validation => &self.validation,
            SplitKind::Test => &self.test,
        }
    }

    /// Sampled non-edges of `kind`.
    #[must_use]
    pub fn negatives(&self, kind: SplitKind) -> &[Edge] {
        match kind {
            SplitKind::Train => &self.train_negatives,
            SplitKind::Validation => &self.validation_negatives,
            SplitKind::Test => &self.test_negatives,
        }
    }

    /// Positives then negatives of `kind`, each paired with its link label.
    #[must_use]
    pub fn labelled_examples(&self, kind: SplitKind) -> Vec<(Edge, bool)> {
        self.positives(kind)
            .iter()
            .map(|&edge| (edge, true))
            .chain(self.negatives(kind).iter().map(|&edge| (edge, false)))
            .collect()
    }

    /// Positive edges of `kind` as `[i, j]` pairs.
    #[must_use]
    pub fn positive_pairs(&self, kind: SplitKind) -> Vec<[usize; 2]> {
        self.positives(kind).iter().map(|&edge| edge.into()).collect()
    }

    /// Sampled non-edges of `kind` as `[i, j]` pairs.
    #[must_use]
    pub fn negative_pairs(&self, kind: SplitKind) -> Vec<[usize; 2]> {
        self.negatives(kind).iter().map(|&edge| edge.into()).collect()
    }

    /// Component count of the input graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn original_components(&self) -> usize { self.original_components }

    /// Requested versus returned held-out counts.
    #[must_use]
    #[rustfmt::skip]
    pub const fn shortfall(&self) -> SplitShortfall { self.shortfall }

    fn verify_disjoint(&self) -> Result<()> {
        let positives = self.train.len() + self.validation.len() + self.test.len();
        let distinct: HashSet<Edge> = self
            .train
            .iter()
            .chain(&self.validation)
            .chain(&self.test)
            .copied()
            .collect();
        if distinct.len() != positives {
            return Err(GeneError::InvariantViolation {
                invariant: "positive splits must be pairwise disjoint",
            });
        }

        let negatives =
            self.train_negatives.len() + self.validation_negatives.len() + self.test_negatives.len();
        let mut sampled = HashSet::with_capacity(negatives);
        for &edge in self
            .train_negatives
            .iter()
            .chain(&self.validation_negatives)
            .chain(&self.test_negatives)
        {
            if distinct.contains(&edge) || !sampled.insert(edge) {
                return Err(GeneError::InvariantViolation {
                    invariant: "negative splits must be disjoint from each other and from true edges",
                });
            }
        }
        Ok(())
    }
}

/// Splits the edges of `graph` into train, validation, and test sets and
/// samples non-edges for each.
///
/// Held-out sizes are `floor(|E| * fraction)`. Negatives number
/// `test_negative_ratio` per test edge requested, one per validation edge
/// requested, and `train_negative_ratio` per retained training edge.
///
/// # Errors
/// Returns [`GeneError::NegativeSamplingExhausted`] when non-edges cannot be
/// found within the attempt budget, [`GeneError::ConnectivityViolated`] if
/// the guard failed to keep the component count, and
/// [`GeneError::InvariantViolation`] if the splits overlap.
///
/// # Examples
/// ```
/// use gene_core::{Graph, SplitConfig, SplitKind, split_edges};
///
/// let ring = Graph::from_edges(8, (0..8).map(|i| (i, (i + 1) % 8)))?;
/// let config = SplitConfig::new(0.25, 0.0)?
///     .with_test_negative_ratio(1)
///     .with_train_negative_ratio(1)
///     .with_rng_seed(11);
/// let split = split_edges(&ring, &config)?;
/// // Once one ring edge is gone every other edge is a bridge.
/// assert_eq!(split.positives(SplitKind::Test).len(), 1);
/// assert_eq!(split.shortfall().missing_test(), 1);
/// assert_eq!(split.train_graph().component_count(), 1);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[instrument(
    name = "split.edges",
    err,
    skip(graph, config),
    fields(nodes = graph.node_count(), edges = graph.edge_count(), seed = config.rng_seed()),
)]
pub fn split_edges(graph: &Graph, config: &SplitConfig) -> Result<EdgeSplit> {
    let original_components = graph.component_count();
    let mut edges = graph.edges();
    let num_test = held_out_count(edges.len(), config.test_fraction());
    let num_val = held_out_count(edges.len(), config.validation_fraction());

    let mut rng = SmallRng::seed_from_u64(config.rng_seed());
    edges.shuffle(&mut rng);

    let mut working = graph.clone();
    let mut test = Vec::with_capacity(num_test);
    let mut validation = Vec::with_capacity(num_val);
    for edge in edges {
        if test.len() == num_test && validation.len() == num_val {
            break;
        }
        working.remove_edge(edge);
        if config.preserve_connectivity() && !working.is_reachable(edge.source(), edge.target()) {
            working.insert_edge(edge)?;
            trace!(%edge, "edge is a bridge; kept for training");
            continue;
        }
        if test.len() < num_test {
            test.push(edge);
        } else {
            validation.push(edge);
        }
    }

    let shortfall = SplitShortfall {
        test_requested: num_test,
        test_returned: test.len(),
        validation_requested: num_val,
        validation_returned: validation.len(),
    };
    if shortfall.is_degraded() {
        warn!(
            test_requested = num_test,
            test_returned = test.len(),
            validation_requested = num_val,
            validation_returned = validation.len(),
            "not enough removable edges to perform the full split"
        );
    }

    if config.preserve_connectivity() {
        let actual = working.component_count();
        if actual != original_components {
            return Err(GeneError::ConnectivityViolated {
                expected: original_components,
                actual,
            });
        }
    }

    let train = working.edges();
    let mut sampler = NegativeSampler::new(graph, &mut rng);
    let test_requested = config.test_negative_ratio().saturating_mul(num_test);
    let test_negatives = sampler.sample(
        SplitKind::Test,
        test_requested,
        config.attempt_budget(test_requested),
    )?;
    let validation_negatives =
        sampler.sample(SplitKind::Validation, num_val, config.attempt_budget(num_val))?;
    let train_requested = config.train_negative_ratio().saturating_mul(train.len());
    let train_negatives = sampler.sample(
        SplitKind::Train,
        train_requested,
        config.attempt_budget(train_requested),
    )?;

    let split = EdgeSplit {
        train_graph: working,
        train,
        validation,
        test,
        train_negatives,
        validation_negatives,
        test_negatives,
        original_components,
        shortfall,
    };
    split.verify_disjoint()?;
    info!(
        train = split.train.len(),
        validation = split.validation.len(),
        test = split.test.len(),
        "edge split complete"
    );
    Ok(split)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "fractions are validated to [0, 1], so the product lies in [0, total]"
)]
fn held_out_count(total: usize, fraction: f64) -> usize {
    ((total as f64) * fraction).floor() as usize
}
