//! Benchmark parameter types.

use std::fmt;

/// Parameters for a benchmark over a synthetic graph.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Expected mean degree of the generated graph.
    pub mean_degree: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.node_count, self.mean_degree)
    }
}
