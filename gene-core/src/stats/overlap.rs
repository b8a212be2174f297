//! Confusion counts of a predicted graph against a reference graph.

use tracing::debug;

use crate::{Result, error::GeneError, graph::Graph};

/// Link-prediction confusion counts over unordered node pairs.
///
/// # Examples
/// ```
/// use gene_core::{Graph, LinkOverlap};
///
/// let actual = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// let predicted = Graph::from_edges(3, [(0, 1), (0, 2)])?;
/// let overlap = LinkOverlap::compare(&predicted, &actual)?;
/// assert_eq!(overlap.true_positives, 1);
/// assert_eq!(overlap.false_positives, 1);
/// assert_eq!(overlap.false_negatives, 1);
/// assert_eq!(overlap.precision(), Some(0.5));
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LinkOverlap {
    /// Pairs linked in both graphs.
    pub true_positives: usize,
    /// Pairs linked only in the prediction.
    pub false_positives: usize,
    /// Pairs linked in neither graph.
    pub true_negatives: usize,
    /// Pairs linked only in the reference.
    pub false_negatives: usize,
}

impl LinkOverlap {
    /// Compares `predicted` with `actual`.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when the graphs have
    /// different node counts.
    pub fn compare(predicted: &Graph, actual: &Graph) -> Result<Self> {
        if predicted.node_count() != actual.node_count() {
            return Err(GeneError::DimensionMismatch {
                what: "predicted graph",
                expected: actual.node_count(),
                actual: predicted.node_count(),
            });
        }

        let nodes = actual.node_count();
        let true_positives = predicted
            .edges()
            .into_iter()
            .filter(|&edge| actual.contains(edge))
            .count();
        let false_positives = predicted.edge_count().saturating_sub(true_positives);
        let false_negatives = actual.edge_count().saturating_sub(true_positives);
        let pairs = nodes.saturating_mul(nodes.saturating_sub(1)) / 2;
        let overlap = Self {
            true_positives,
            false_positives,
            true_negatives: pairs
                .saturating_sub(true_positives)
                .saturating_sub(false_positives)
                .saturating_sub(false_negatives),
            false_negatives,
        };
        debug!(?overlap, "link overlap computed");
        Ok(overlap)
    }

    /// Fraction of predicted links that are real.
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// Fraction of real links that were predicted.
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Fraction of pairs classified correctly.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        ratio(
            self.true_positives + self.true_negatives,
            self.true_positives + self.false_positives + self.true_negatives + self.false_negatives,
        )
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "confusion ratios are reported as floating-point values"
)]
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}
