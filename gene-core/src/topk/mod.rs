//! Streaming top-k selection of scored node pairs.
//!
//! [`select_top_k`] keeps a bounded min-heap of the best `k` pairs seen so
//! far, so the O(N^2) candidate space never has to be materialised.
//! [`reconstruct_top_k`] applies it to a [`ProbabilityMatrix`] to produce the
//! highest-probability graph with a given edge count.


use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use tracing::{debug, instrument};

use crate::{
    Result,
    graph::{Edge, Graph},
    probability::ProbabilityMatrix,
};

/// A candidate edge with its score.
///
/// Pairs order by score using [`f64::total_cmp`], then by edge, so every
/// value (including NaN) has a defined position.
#[derive(Clone, Copy, Debug)]
pub struct ScoredPair {
    score: f64,
    edge: Edge,
}

impl ScoredPair {
    /// Pairs `edge` with `score`.
    #[must_use]
    pub const fn new(score: f64, edge: Edge) -> Self {
        Self { score, edge }
    }

    /// The candidate's score.
    #[must_use]
    #[rustfmt::skip]
    pub const fn score(&self) -> f64 { self.score }

    /// The candidate edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> Edge { self.edge }
}

impl PartialEq for ScoredPair {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredPair {}

impl PartialOrd for ScoredPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredPair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}

/// Returns the `k` highest-scoring pairs in descending order.
///
/// The first `k` pairs fill the heap; each later pair evicts the current
/// minimum only when its score is strictly greater. Among equal scores the
/// earliest pairs therefore win. Runs in O(M log k) for M pairs.
///
/// # Examples
/// ```
/// use gene_core::{Edge, ScoredPair, select_top_k};
///
/// let pairs = [(0.2, 0, 1), (0.9, 1, 2), (0.5, 0, 2)]
///     .into_iter()
///     .map(|(score, i, j)| Ok(ScoredPair::new(score, Edge::new(i, j)?)))
///     .collect::<Result<Vec<_>, gene_core::GeneError>>()?;
/// let best = select_top_k(pairs, 2);
/// assert_eq!(best[0].edge(), Edge::new(1, 2)?);
/// assert_eq!(best[1].score(), 0.5);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[must_use]
pub fn select_top_k<I>(pairs: I, k: usize) -> Vec<ScoredPair>
where
    I: IntoIterator<Item = ScoredPair>,
{
    if k == 0 {
        return Vec::new();
    }

    let pairs = pairs.into_iter();
    let expected = pairs.size_hint().1.unwrap_or(pairs.size_hint().0);
    let mut heap: BinaryHeap<Reverse<ScoredPair>> = BinaryHeap::with_capacity(k.min(expected));
    for pair in pairs {
        if heap.len() < k {
            heap.push(Reverse(pair));
            continue;
        }
        if let Some(mut weakest) = heap.peek_mut() {
            if pair.score.total_cmp(&weakest.0.score) == Ordering::Greater {
                *weakest = Reverse(pair);
            }
        }
    }

    let mut selected: Vec<ScoredPair> = heap.into_iter().map(|Reverse(pair)| pair).collect();
    selected.sort_unstable_by(|a, b| b.cmp(a));
    selected
}

/// Graph assembled from the highest-probability pairs of a matrix.
#[derive(Clone, Debug)]
pub struct RankedReconstruction {
    graph: Graph,
    selected: Vec<ScoredPair>,
}

impl RankedReconstruction {
    /// The reconstructed graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Selected pairs in descending score order.
    #[must_use]
    #[rustfmt::skip]
    pub fn selected(&self) -> &[ScoredPair] { &self.selected }

    /// Number of selected pairs incident to each node.
    #[must_use]
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.graph.degrees()
    }

    /// Dense 0/1 adjacency matrix of the reconstructed graph.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<u8>> {
        self.graph.to_dense()
    }

    /// Lowest selected score, if any pair was selected.
    #[must_use]
    pub fn min_score(&self) -> Option<f64> {
        self.selected.last().map(ScoredPair::score)
    }

    /// Highest selected score, if any pair was selected.
    #[must_use]
    pub fn max_score(&self) -> Option<f64> {
        self.selected.first().map(ScoredPair::score)
    }
}

/// Streams every pair `i < j` of `probability`, scored by
/// `max(p[i][j], p[j][i])`, and keeps the best `edge_count`.
///
/// # Errors
/// Propagates graph construction failures, which indicate a logic error.
#[instrument(
    name = "topk.reconstruct",
    err,
    skip(probability),
    fields(nodes = probability.node_count()),
)]
pub fn reconstruct_top_k(
    probability: &ProbabilityMatrix,
    edge_count: usize,
) -> Result<RankedReconstruction> {
    let node_count = probability.node_count();
    let pair_count = node_count.saturating_mul(node_count.saturating_sub(1)) / 2;
    let edge_count = edge_count.min(pair_count);
    let candidates = (0..node_count).flat_map(|i| {
        ((i + 1)..node_count)
            .map(move |j| ScoredPair::new(probability.pair_score(i, j), Edge::canonical(i, j)))
    });
    let selected = select_top_k(candidates, edge_count);

    let mut graph = Graph::new(node_count);
    for pair in &selected {
        graph.insert_edge(pair.edge)?;
    }
    debug!(
        selected = selected.len(),
        min_score = selected.last().map(ScoredPair::score),
        "top-k reconstruction complete"
    );
    Ok(RankedReconstruction { graph, selected })
}
