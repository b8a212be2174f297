//! Per-node degree targets for reconstruction.

use std::cmp::Reverse;

use crate::{Result, error::GeneError};

/// Desired final degree of every node.
///
/// # Examples
/// ```
/// use gene_core::DegreeTargets;
///
/// // Real degrees [3, 1, 2] dressed onto a synthetic ranking where node 1
/// // is strongest and node 0 weakest.
/// let targets = DegreeTargets::by_rank(&[3, 1, 2], &[0, 9, 4])?;
/// assert_eq!(targets.as_slice(), &[1, 3, 2]);
/// assert_eq!(targets.edge_budget(), 3);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DegreeTargets {
    degrees: Vec<usize>,
}

impl DegreeTargets {
    /// Node `i` targets `degrees[i]`.
    #[must_use]
    pub const fn by_identity(degrees: Vec<usize>) -> Self {
        Self { degrees }
    }

    /// Assigns the multiset `real_degrees` to nodes by rank of `signal`.
    ///
    /// Real degrees are sorted descending and nodes are ranked by
    /// `(signal, node)` descending; the i-th largest degree goes to the
    /// i-th ranked node.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when the inputs differ in
    /// length.
    pub fn by_rank(real_degrees: &[usize], signal: &[usize]) -> Result<Self> {
        if real_degrees.len() != signal.len() {
            return Err(GeneError::DimensionMismatch {
                what: "synthetic degree signal",
                expected: real_degrees.len(),
                actual: signal.len(),
            });
        }

        let mut sorted_degrees = real_degrees.to_vec();
        sorted_degrees.sort_unstable_by_key(|&degree| Reverse(degree));

        let mut ranking: Vec<usize> = (0..signal.len()).collect();
        ranking.sort_unstable_by_key(|&node| Reverse((signal[node], node)));

        let mut degrees = vec![0; signal.len()];
        for (node, degree) in ranking.into_iter().zip(sorted_degrees) {
            degrees[node] = degree;
        }
        Ok(Self { degrees })
    }

    /// Targets indexed by node.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[usize] { &self.degrees }

    /// Number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.degrees.len() }

    /// Returns `true` when there are no nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.degrees.is_empty() }

    /// Sum of all targets, saturating at `usize::MAX`.
    #[must_use]
    pub fn total(&self) -> usize {
        self.degrees
            .iter()
            .fold(0_usize, |total, &degree| total.saturating_add(degree))
    }

    /// Edges needed to meet every target: half the degree sum.
    #[must_use]
    pub fn edge_budget(&self) -> usize {
        self.total() / 2
    }
}

impl From<Vec<usize>> for DegreeTargets {
    fn from(degrees: Vec<usize>) -> Self {
        Self::by_identity(degrees)
    }
}
