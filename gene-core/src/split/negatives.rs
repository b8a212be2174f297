//! Bounded rejection sampling of non-edges.

use std::collections::HashSet;

use rand::{Rng, rngs::SmallRng};
use tracing::{debug, warn};

use crate::{
    Result,
    error::GeneError,
    graph::{Edge, Graph},
};

use super::SplitKind;

/// Draws non-edges of `graph` that are distinct across every phase sampled
/// through the same instance.
pub(super) struct NegativeSampler<'a> {
    graph: &'a Graph,
    rng: &'a mut SmallRng,
    taken: HashSet<Edge>,
}

impl<'a> NegativeSampler<'a> {
    pub(super) fn new(graph: &'a Graph, rng: &'a mut SmallRng) -> Self {
        Self {
            graph,
            rng,
            taken: HashSet::new(),
        }
    }

    /// Non-edges not yet handed out.
    fn available(&self) -> usize {
        let nodes = self.graph.node_count();
        let pairs = nodes.saturating_mul(nodes.saturating_sub(1)) / 2;
        pairs
            .saturating_sub(self.graph.edge_count())
            .saturating_sub(self.taken.len())
    }

    /// Samples `requested` fresh non-edges, consuming at most `budget` draws.
    pub(super) fn sample(
        &mut self,
        split: SplitKind,
        requested: usize,
        budget: u64,
    ) -> Result<Vec<Edge>> {
        if requested == 0 {
            return Ok(Vec::new());
        }

        let nodes = self.graph.node_count();
        if requested > self.available() {
            warn!(
                %split,
                requested,
                available = self.available(),
                "not enough non-edges for negative sampling"
            );
            return Err(GeneError::NegativeSamplingExhausted {
                split,
                accepted: 0,
                requested,
                attempts: 0,
            });
        }

        let mut accepted = Vec::with_capacity(requested);
        let mut attempts = 0_u64;
        while accepted.len() < requested {
            if attempts == budget {
                warn!(
                    %split,
                    accepted = accepted.len(),
                    requested,
                    attempts,
                    "negative sampling exhausted its budget"
                );
                return Err(GeneError::NegativeSamplingExhausted {
                    split,
                    accepted: accepted.len(),
                    requested,
                    attempts,
                });
            }
            attempts += 1;

            let left = self.rng.gen_range(0..nodes);
            let right = self.rng.gen_range(0..nodes);
            if left == right {
                continue;
            }
            let candidate = Edge::canonical(left, right);
            if self.graph.contains(candidate) || !self.taken.insert(candidate) {
                continue;
            }
            accepted.push(candidate);
        }
        debug!(%split, accepted = accepted.len(), attempts, "negatives sampled");
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::NegativeSampler;
    use crate::{
        error::GeneError,
        graph::{Edge, Graph},
        split::SplitKind,
    };

    /// Complete graph on `nodes` nodes without the edge `0 - 1`.
    fn complete_but_one(nodes: usize) -> Graph {
        Graph::from_edges(
            nodes,
            (0..nodes)
                .flat_map(|i| ((i + 1)..nodes).map(move |j| (i, j)))
                .filter(|&pair| pair != (0, 1)),
        )
        .expect("edges are valid")
    }

    #[test]
    fn budget_bounds_the_number_of_draws() {
        let graph = complete_but_one(30);
        let mut exhausted = 0;
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut sampler = NegativeSampler::new(&graph, &mut rng);
            match sampler.sample(SplitKind::Validation, 1, 5) {
                Ok(accepted) => assert_eq!(accepted, vec![Edge::canonical(0, 1)]),
                Err(err) => {
                    assert_eq!(
                        err,
                        GeneError::NegativeSamplingExhausted {
                            split: SplitKind::Validation,
                            accepted: 0,
                            requested: 1,
                            attempts: 5,
                        }
                    );
                    exhausted += 1;
                }
            }
        }
        // One non-edge among 900 ordered draws is rarely hit within five.
        assert!(exhausted > 0, "no seed exhausted its budget");
    }

    #[test]
    fn taken_pairs_are_not_handed_out_twice() {
        let graph = complete_but_one(4);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut sampler = NegativeSampler::new(&graph, &mut rng);
        let first = sampler
            .sample(SplitKind::Test, 1, 10_000)
            .expect("one non-edge is free");
        assert_eq!(first, vec![Edge::canonical(0, 1)]);
        let err = sampler
            .sample(SplitKind::Train, 1, 10_000)
            .expect_err("the only non-edge is taken");
        assert!(matches!(
            err,
            GeneError::NegativeSamplingExhausted { attempts: 0, .. }
        ));
    }
}
