//! Shared test utilities for `gene-core`.

use gene_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{graph::Graph, probability::ProbabilityMatrix};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `GENE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Cycle `0 - 1 - ... - (n - 1) - 0`.
pub(crate) fn cycle_graph(node_count: usize) -> Graph {
    Graph::from_edges(
        node_count,
        (0..node_count).map(|node| (node, (node + 1) % node_count)),
    )
    .expect("cycle edges are valid for three or more nodes")
}

/// Path `0 - 1 - ... - (n - 1)`.
pub(crate) fn path_graph(node_count: usize) -> Graph {
    Graph::from_edges(
        node_count,
        (1..node_count).map(|node| (node - 1, node)),
    )
    .expect("path edges are valid")
}

/// Complete graph on `node_count` nodes.
pub(crate) fn complete_graph(node_count: usize) -> Graph {
    Graph::from_edges(
        node_count,
        (0..node_count).flat_map(|i| ((i + 1)..node_count).map(move |j| (i, j))),
    )
    .expect("complete graph edges are valid")
}

/// Probability matrix with `value` everywhere except a zero diagonal.
pub(crate) fn uniform_probability(node_count: usize, value: f64) -> ProbabilityMatrix {
    ProbabilityMatrix::from_fn(node_count, |i, j| if i == j { 0.0 } else { value })
        .expect("uniform probabilities are valid")
}
