//! Edge-probability matrices and the scorer seam to embedding models.
//!
//! The neural encoder and the generative model live outside this crate. They
//! reach the graph algorithms through [`LinkScorer`], [`EmbeddingModel`], and
//! [`EmbeddingGenerator`]; [`generate_probability_matrix`] materialises the
//! all-pairs scores consumed by top-k selection and reconstruction.

mod embedding;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{Result, error::GeneError};

pub use self::embedding::{
    EmbeddingGenerator, EmbeddingModel, Embeddings, HadamardLinkScorer, LinkHead,
};

/// Dense `N x N` matrix of edge probabilities.
///
/// Values are finite and lie in `[0, 1]`. The matrix need not be symmetric;
/// consumers read it through [`ProbabilityMatrix::pair_score`], which takes
/// the larger of the two directed entries.
///
/// # Examples
/// ```
/// use gene_core::ProbabilityMatrix;
///
/// let matrix = ProbabilityMatrix::from_rows(vec![vec![0.0, 0.2], vec![0.7, 0.0]])?;
/// assert_eq!(matrix.get(0, 1), Some(0.2));
/// assert_eq!(matrix.pair_score(0, 1), 0.7);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityMatrix {
    node_count: usize,
    values: Vec<f64>,
}

impl ProbabilityMatrix {
    /// Builds a matrix from row vectors.
    ///
    /// # Errors
    /// Returns [`GeneError::NonSquareMatrix`] for ragged input and
    /// [`GeneError::InvalidProbability`] for values outside `[0, 1]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let node_count = rows.len();
        let mut values = Vec::with_capacity(node_count * node_count);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != node_count {
                return Err(GeneError::NonSquareMatrix {
                    row,
                    len: entries.len(),
                    expected: node_count,
                });
            }
            for (col, value) in entries.into_iter().enumerate() {
                values.push(validate_probability(row, col, value)?);
            }
        }
        Ok(Self { node_count, values })
    }

    /// Builds a matrix by evaluating `score(row, col)` for every cell.
    ///
    /// # Errors
    /// Returns [`GeneError::InvalidProbability`] for values outside `[0, 1]`.
    pub fn from_fn<F>(node_count: usize, mut score: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(node_count * node_count);
        for row in 0..node_count {
            for col in 0..node_count {
                values.push(validate_probability(row, col, score(row, col))?);
            }
        }
        Ok(Self { node_count, values })
    }

    /// Returns the matrix dimension.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the directed entry `p[row][col]`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.node_count || col >= self.node_count {
            return None;
        }
        self.values.get(row * self.node_count + col).copied()
    }

    /// Returns row `row` as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let start = row.checked_mul(self.node_count)?;
        self.values.get(start..start + self.node_count)
    }

    /// Returns the undirected score `max(p[i][j], p[j][i])`. Out-of-range
    /// nodes score zero.
    #[must_use]
    pub fn pair_score(&self, left: usize, right: usize) -> f64 {
        let forward = self.get(left, right).unwrap_or(0.0);
        let backward = self.get(right, left).unwrap_or(0.0);
        forward.max(backward)
    }
}

fn validate_probability(row: usize, col: usize, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GeneError::InvalidProbability { row, col, value })
    }
}

/// Produces link probabilities from one node to every node.
///
/// Implementations must return exactly [`LinkScorer::node_count`] values in
/// `[0, 1]` for each call.
pub trait LinkScorer: Sync {
    /// Number of nodes the scorer covers.
    fn node_count(&self) -> usize;

    /// Scores the link from `node` to each node `0..node_count`.
    ///
    /// # Errors
    /// Implementations report failures as [`GeneError::Scorer`].
    fn score_row(&self, node: usize) -> Result<Vec<f64>>;
}

/// Materialises the all-pairs probability matrix of `scorer`.
///
/// For each `i < j` the entry produced by row `i` is mirrored into both
/// `p[i][j]` and `p[j][i]`; the diagonal is zero. Rows are scored in
/// parallel when the `parallel` feature is enabled.
///
/// # Errors
/// Returns [`GeneError::DimensionMismatch`] when a row has the wrong length,
/// [`GeneError::InvalidProbability`] for out-of-range scores, and any error
/// raised by the scorer.
///
/// # Examples
/// ```
/// use gene_core::{LinkScorer, Result, generate_probability_matrix};
///
/// struct Constant;
///
/// impl LinkScorer for Constant {
///     fn node_count(&self) -> usize { 3 }
///     fn score_row(&self, _node: usize) -> Result<Vec<f64>> { Ok(vec![0.5; 3]) }
/// }
///
/// let matrix = generate_probability_matrix(&Constant)?;
/// assert_eq!(matrix.get(0, 0), Some(0.0));
/// assert_eq!(matrix.get(2, 1), Some(0.5));
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[instrument(name = "probability.generate", err, skip(scorer), fields(nodes = scorer.node_count()))]
pub fn generate_probability_matrix<S>(scorer: &S) -> Result<ProbabilityMatrix>
where
    S: LinkScorer + ?Sized,
{
    let node_count = scorer.node_count();
    let rows = score_rows(scorer, node_count)?;

    let mut values = vec![0.0; node_count * node_count];
    for (row, scores) in rows.iter().enumerate() {
        if scores.len() != node_count {
            return Err(GeneError::DimensionMismatch {
                what: "scorer row",
                expected: node_count,
                actual: scores.len(),
            });
        }
        for (col, &score) in scores.iter().enumerate().skip(row + 1) {
            let value = validate_probability(row, col, score)?;
            values[row * node_count + col] = value;
            values[col * node_count + row] = value;
        }
    }
    debug!(nodes = node_count, "probability matrix generated");
    Ok(ProbabilityMatrix { node_count, values })
}

#[cfg(feature = "parallel")]
fn score_rows<S: LinkScorer + ?Sized>(scorer: &S, node_count: usize) -> Result<Vec<Vec<f64>>> {
    (0..node_count)
        .into_par_iter()
        .map(|node| scorer.score_row(node))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_rows<S: LinkScorer + ?Sized>(scorer: &S, node_count: usize) -> Result<Vec<Vec<f64>>> {
    (0..node_count).map(|node| scorer.score_row(node)).collect()
}
