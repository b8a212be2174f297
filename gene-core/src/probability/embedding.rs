//! Embedding matrices and the logistic Hadamard link head.

use crate::{Result, error::GeneError};

use super::LinkScorer;

/// Row-major matrix of node embeddings.
///
/// # Examples
/// ```
/// use gene_core::Embeddings;
///
/// let embeddings = Embeddings::from_rows(vec![vec![1.0, 0.0], vec![0.5, 0.5]])?;
/// assert_eq!(embeddings.len(), 2);
/// assert_eq!(embeddings.row(1), Some(&[0.5, 0.5][..]));
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Embeddings {
    dimension: usize,
    values: Vec<f32>,
}

impl Embeddings {
    /// Builds an embedding matrix from equally sized rows.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when rows differ in length and
    /// [`GeneError::InvalidConfiguration`] for zero-width rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.first().map_or(0, Vec::len);
        if dimension == 0 && !rows.is_empty() {
            return Err(GeneError::InvalidConfiguration {
                reason: "embeddings must have a positive dimension".into(),
            });
        }
        let mut values = Vec::with_capacity(rows.len() * dimension);
        for row in rows {
            if row.len() != dimension {
                return Err(GeneError::DimensionMismatch {
                    what: "embedding row",
                    expected: dimension,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self { dimension, values })
    }

    /// Number of embedded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.values.len() / self.dimension
        }
    }

    /// Returns `true` when no node is embedded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Width of each embedding.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimension(&self) -> usize { self.dimension }

    /// Returns the embedding of `node`.
    #[must_use]
    pub fn row(&self, node: usize) -> Option<&[f32]> {
        let start = node.checked_mul(self.dimension)?;
        self.values.get(start..start + self.dimension)
    }
}

/// Encoder that maps nodes to embeddings and scores candidate links.
///
/// Training happens outside this crate; implementors expose the trained
/// model for probability generation and evaluation.
pub trait EmbeddingModel {
    /// Width of the produced embeddings.
    fn dimension(&self) -> usize;

    /// Returns the embedding of `node`.
    ///
    /// # Errors
    /// Returns [`GeneError::NodeOutOfBounds`] for unknown nodes.
    fn embed(&self, node: usize) -> Result<Vec<f32>>;

    /// Returns the probability that `left` and `right` are linked.
    ///
    /// # Errors
    /// Returns [`GeneError::NodeOutOfBounds`] for unknown nodes.
    fn score(&self, left: usize, right: usize) -> Result<f64>;
}

/// Generative model producing synthetic node embeddings.
pub trait EmbeddingGenerator {
    /// Draws `count` synthetic embeddings.
    ///
    /// # Errors
    /// Implementations report failures as [`GeneError::Scorer`].
    fn generate_embeddings(&mut self, count: usize) -> Result<Embeddings>;
}

/// Weights of the logistic link head `sigmoid(w . (x * y) + b)` applied to
/// the element-wise product of two embeddings.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkHead {
    weights: Vec<f32>,
    bias: f32,
}

impl LinkHead {
    /// Creates a link head from its weights and bias.
    #[must_use]
    pub const fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    /// Width the head expects.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    fn probability(&self, left: &[f32], right: &[f32]) -> f64 {
        let logit: f32 = self
            .weights
            .iter()
            .zip(left.iter().zip(right))
            .map(|(weight, (x, y))| weight * x * y)
            .sum::<f32>()
            + self.bias;
        1.0 / (1.0 + (-f64::from(logit)).exp())
    }
}

/// Scores links with a [`LinkHead`] over a fixed [`Embeddings`] matrix.
///
/// # Examples
/// ```
/// use gene_core::{EmbeddingModel, Embeddings, HadamardLinkScorer, LinkHead};
///
/// let embeddings = Embeddings::from_rows(vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]])?;
/// let scorer = HadamardLinkScorer::new(embeddings, LinkHead::new(vec![4.0, 4.0], -2.0))?;
/// assert!(scorer.score(0, 1)? > 0.5);
/// assert!(scorer.score(0, 2)? < 0.5);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HadamardLinkScorer {
    embeddings: Embeddings,
    head: LinkHead,
}

impl HadamardLinkScorer {
    /// Pairs `embeddings` with a link head of the same width.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when the widths differ.
    pub fn new(embeddings: Embeddings, head: LinkHead) -> Result<Self> {
        if !embeddings.is_empty() && head.dimension() != embeddings.dimension() {
            return Err(GeneError::DimensionMismatch {
                what: "link head weights",
                expected: embeddings.dimension(),
                actual: head.dimension(),
            });
        }
        Ok(Self { embeddings, head })
    }

    /// Returns the embedding matrix being scored.
    #[must_use]
    #[rustfmt::skip]
    pub const fn embeddings(&self) -> &Embeddings { &self.embeddings }

    fn row(&self, node: usize) -> Result<&[f32]> {
        self.embeddings
            .row(node)
            .ok_or(GeneError::NodeOutOfBounds {
                node,
                node_count: self.embeddings.len(),
            })
    }
}

impl EmbeddingModel for HadamardLinkScorer {
    fn dimension(&self) -> usize {
        self.embeddings.dimension()
    }

    fn embed(&self, node: usize) -> Result<Vec<f32>> {
        self.row(node).map(<[f32]>::to_vec)
    }

    fn score(&self, left: usize, right: usize) -> Result<f64> {
        Ok(self.head.probability(self.row(left)?, self.row(right)?))
    }
}

impl LinkScorer for HadamardLinkScorer {
    fn node_count(&self) -> usize {
        self.embeddings.len()
    }

    fn score_row(&self, node: usize) -> Result<Vec<f64>> {
        let query = self.row(node)?;
        (0..self.embeddings.len())
            .map(|other| Ok(self.head.probability(query, self.row(other)?)))
            .collect()
    }
}
