#![allow(
    dead_code,
    reason = "each integration test binary uses a subset of these helpers"
)]

use gene_core::{EmbeddingGenerator, Embeddings, GeneError, Graph, ProbabilityMatrix, Result};

/// Cycle `0 - 1 - ... - (n - 1) - 0`.
#[must_use]
pub fn cycle(nodes: usize) -> Graph {
    Graph::from_edges(nodes, (0..nodes).map(|node| (node, (node + 1) % nodes)))
        .expect("cycle edges are valid")
}

/// Complete graph on `nodes` nodes.
#[must_use]
pub fn complete(nodes: usize) -> Graph {
    Graph::from_edges(
        nodes,
        (0..nodes).flat_map(|i| ((i + 1)..nodes).map(move |j| (i, j))),
    )
    .expect("complete graph edges are valid")
}

/// Two triangles joined by the bridge `2 - 3`.
#[must_use]
pub fn barbell() -> Graph {
    Graph::from_edges(6, [(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)])
        .expect("barbell edges are valid")
}

/// Scores adjacent pairs of `graph` at `hit` and every other pair at `miss`.
#[must_use]
pub fn echo_probability(graph: &Graph, hit: f64, miss: f64) -> ProbabilityMatrix {
    ProbabilityMatrix::from_fn(graph.node_count(), |i, j| {
        if i == j {
            0.0
        } else if graph.are_adjacent(i, j) {
            hit
        } else {
            miss
        }
    })
    .expect("echo probabilities are valid")
}

/// Generator that hands out one-hot embeddings by community.
pub struct CommunityGenerator {
    pub communities: Vec<usize>,
    pub width: usize,
}

impl EmbeddingGenerator for CommunityGenerator {
    fn generate_embeddings(&mut self, count: usize) -> Result<Embeddings> {
        if count > self.communities.len() {
            return Err(GeneError::Scorer {
                node: self.communities.len(),
                reason: "generator has no community for this node".into(),
            });
        }
        Embeddings::from_rows(
            self.communities[..count]
                .iter()
                .map(|&community| {
                    let mut row = vec![0.0; self.width];
                    row[community] = 1.0;
                    row
                })
                .collect(),
        )
    }
}
