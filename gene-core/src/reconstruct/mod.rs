//! Degree-constrained graph reconstruction (revised Havel-Hakimi).
//!
//! [`Reconstructor::reconstruct`] repeatedly picks the node with the largest
//! remaining degree deficit and links it to its most probable partners that
//! still have spare degree. Allocation stops when the edge budget is spent,
//! when a pass adds nothing, or when the iteration bound is reached. Falling
//! short of the budget is reported, not raised.

mod targets;

use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, trace, warn};

use crate::{
    Result,
    error::GeneError,
    graph::{Edge, Graph},
    probability::ProbabilityMatrix,
};

pub use self::targets::DegreeTargets;

const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Why an allocation run stopped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Termination {
    /// Every budgeted edge was placed.
    BudgetExhausted,
    /// No node could receive another edge.
    Stalled,
    /// The iteration bound was reached first.
    IterationLimit,
}

impl Termination {
    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BudgetExhausted => "budget_exhausted",
            Self::Stalled => "stalled",
            Self::IterationLimit => "iteration_limit",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Greedy degree-constrained reconstructor.
///
/// # Examples
/// ```
/// use gene_core::{DegreeTargets, ProbabilityMatrix, Reconstructor, Termination};
///
/// let probability = ProbabilityMatrix::from_fn(4, |i, j| if i == j { 0.0 } else { 1.0 })?;
/// let targets = DegreeTargets::by_identity(vec![2, 2, 1, 1]);
/// let result = Reconstructor::new()
///     .with_edge_budget(2)
///     .reconstruct(&targets, &probability)?;
/// assert_eq!(result.placed(), 2);
/// assert_eq!(result.termination(), Termination::BudgetExhausted);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconstructor {
    edge_budget: Option<usize>,
    max_iterations: usize,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconstructor {
    /// Creates a reconstructor whose budget is half the target degree sum.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            edge_budget: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the number of edges to place.
    #[must_use]
    pub const fn with_edge_budget(mut self, budget: usize) -> Self {
        self.edge_budget = Some(budget);
        self
    }

    /// Bounds the number of allocation passes. Values below one are raised
    /// to one.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Explicit edge budget, if one was set.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_budget(&self) -> Option<usize> { self.edge_budget }

    /// Maximum number of allocation passes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_iterations(&self) -> usize { self.max_iterations }

    /// Places edges so that node degrees approach `targets`, preferring the
    /// most probable pairs of `probability`.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when the matrix and targets
    /// cover different node counts and [`GeneError::InvariantViolation`] if
    /// a degree overshoots its target or the output is not a simple
    /// undirected adjacency matrix.
    #[instrument(
        name = "reconstruct.run",
        err,
        skip(self, targets, probability),
        fields(nodes = targets.len(), max_iterations = self.max_iterations),
    )]
    pub fn reconstruct(
        &self,
        targets: &DegreeTargets,
        probability: &ProbabilityMatrix,
    ) -> Result<Reconstruction> {
        if probability.node_count() != targets.len() {
            return Err(GeneError::DimensionMismatch {
                what: "probability matrix",
                expected: targets.len(),
                actual: probability.node_count(),
            });
        }

        let requested = self.edge_budget.unwrap_or_else(|| targets.edge_budget());
        let mut state = Allocation::new(targets.as_slice(), requested);
        let mut iterations = 0;
        let termination = loop {
            if state.budget == 0 {
                break Termination::BudgetExhausted;
            }
            if iterations == self.max_iterations {
                warn!(
                    iterations,
                    remaining_budget = state.budget,
                    "reconstruction hit its iteration bound"
                );
                break Termination::IterationLimit;
            }
            let Some(node) = state.most_deficient() else {
                break Termination::Stalled;
            };
            iterations += 1;

            let candidates = rank_candidates(probability, node);
            let added = state.allocate(node, &candidates)?;
            state.refresh_deficits()?;
            trace!(node, added, remaining_budget = state.budget, "allocation pass");
            if added == 0 {
                break Termination::Stalled;
            }
        };

        let placed = requested - state.budget;
        if termination == Termination::Stalled && placed < requested {
            warn!(placed, requested, "reconstruction stalled before spending its budget");
        }
        let reconstruction = Reconstruction::new(state, requested, termination, iterations)?;
        info!(
            placed = reconstruction.placed,
            requested,
            iterations,
            termination = %termination,
            "reconstruction complete"
        );
        Ok(reconstruction)
    }
}

/// Mutable allocation state owned by one reconstruction run.
struct Allocation<'a> {
    targets: &'a [usize],
    graph: Graph,
    deficits: Vec<usize>,
    budget: usize,
}

impl<'a> Allocation<'a> {
    fn new(targets: &'a [usize], budget: usize) -> Self {
        Self {
            targets,
            graph: Graph::new(targets.len()),
            deficits: targets.to_vec(),
            budget,
        }
    }

    /// Node with the largest positive deficit; ties go to the higher id.
    fn most_deficient(&self) -> Option<usize> {
        (0..self.deficits.len())
            .filter(|&node| self.deficits[node] > 0)
            .max_by_key(|&node| (self.deficits[node], node))
    }

    fn allocate(&mut self, node: usize, candidates: &[usize]) -> Result<usize> {
        let mut added = 0;
        for &partner in candidates {
            if self.deficits[node] == 0 || self.budget == 0 {
                break;
            }
            if self.deficits[partner] == 0 || self.graph.are_adjacent(node, partner) {
                continue;
            }
            self.graph.insert_edge(Edge::new(node, partner)?)?;
            self.deficits[node] -= 1;
            self.deficits[partner] -= 1;
            self.budget -= 1;
            added += 1;
        }
        Ok(added)
    }

    fn refresh_deficits(&mut self) -> Result<()> {
        for (node, deficit) in self.deficits.iter_mut().enumerate() {
            *deficit = self.targets[node]
                .checked_sub(self.graph.degree(node))
                .ok_or(GeneError::InvariantViolation {
                    invariant: "node degree must not exceed its target",
                })?;
        }
        Ok(())
    }
}

/// Every node except `node`, ordered by descending `max(P[node][y], P[y][node])`
/// and then by descending id.
fn rank_candidates(probability: &ProbabilityMatrix, node: usize) -> Vec<usize> {
    let mut scored = score_candidates(probability, node);
    sort_candidates(&mut scored);
    scored.into_iter().map(|(_, partner)| partner).collect()
}

#[cfg(feature = "parallel")]
fn score_candidates(probability: &ProbabilityMatrix, node: usize) -> Vec<(f64, usize)> {
    (0..probability.node_count())
        .into_par_iter()
        .filter(|&partner| partner != node)
        .map(|partner| (probability.pair_score(node, partner), partner))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_candidates(probability: &ProbabilityMatrix, node: usize) -> Vec<(f64, usize)> {
    (0..probability.node_count())
        .filter(|&partner| partner != node)
        .map(|partner| (probability.pair_score(node, partner), partner))
        .collect()
}

fn compare_candidates(a: &(f64, usize), b: &(f64, usize)) -> std::cmp::Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

#[cfg(feature = "parallel")]
fn sort_candidates(scored: &mut [(f64, usize)]) {
    scored.par_sort_unstable_by(compare_candidates);
}

#[cfg(not(feature = "parallel"))]
fn sort_candidates(scored: &mut [(f64, usize)]) {
    scored.sort_unstable_by(compare_candidates);
}

/// Outcome of [`Reconstructor::reconstruct`].
#[derive(Clone, Debug)]
pub struct Reconstruction {
    graph: Graph,
    adjacency: Vec<Vec<u8>>,
    residual: Vec<usize>,
    placed: usize,
    requested: usize,
    termination: Termination,
    iterations: usize,
    self_loop_count: usize,
    symmetry_violation_count: usize,
}

impl Reconstruction {
    fn new(
        state: Allocation<'_>,
        requested: usize,
        termination: Termination,
        iterations: usize,
    ) -> Result<Self> {
        let adjacency = state.graph.to_dense();
        let node_count = adjacency.len();
        let self_loop_count = (0..node_count)
            .filter(|&node| adjacency[node][node] != 0)
            .count();
        let symmetry_violation_count = (0..node_count)
            .flat_map(|i| ((i + 1)..node_count).map(move |j| (i, j)))
            .filter(|&(i, j)| adjacency[i][j] != adjacency[j][i])
            .count();
        if self_loop_count != 0 {
            return Err(GeneError::InvariantViolation {
                invariant: "reconstructed adjacency must have a zero diagonal",
            });
        }
        if symmetry_violation_count != 0 {
            return Err(GeneError::InvariantViolation {
                invariant: "reconstructed adjacency must be symmetric",
            });
        }

        Ok(Self {
            placed: state.graph.edge_count(),
            graph: state.graph,
            adjacency,
            residual: state.deficits,
            requested,
            termination,
            iterations,
            self_loop_count,
            symmetry_violation_count,
        })
    }

    /// The reconstructed graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &Graph { &self.graph }

    /// Dense symmetric 0/1 adjacency matrix with a zero diagonal.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency(&self) -> &[Vec<u8>] { &self.adjacency }

    /// Degree still missing at each node.
    #[must_use]
    #[rustfmt::skip]
    pub fn residual_deficits(&self) -> &[usize] { &self.residual }

    /// Edges placed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn placed(&self) -> usize { self.placed }

    /// Edges requested.
    #[must_use]
    #[rustfmt::skip]
    pub const fn requested(&self) -> usize { self.requested }

    /// Edges requested but not placed.
    #[must_use]
    pub const fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.placed)
    }

    /// Why allocation stopped.
    #[must_use]
    #[rustfmt::skip]
    pub const fn termination(&self) -> Termination { self.termination }

    /// Allocation passes performed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn iterations(&self) -> usize { self.iterations }

    /// Diagonal entries set in the output. Always zero.
    #[must_use]
    #[rustfmt::skip]
    pub const fn self_loop_count(&self) -> usize { self.self_loop_count }

    /// Asymmetric entry pairs in the output. Always zero.
    #[must_use]
    #[rustfmt::skip]
    pub const fn symmetry_violation_count(&self) -> usize { self.symmetry_violation_count }
}
