//! Canonical undirected edges.

use std::fmt;

use crate::{Result, error::GeneError};

/// An undirected edge stored in canonical form (`source < target`).
///
/// Canonicalisation is idempotent and insensitive to endpoint order, so an
/// undirected edge has exactly one representation.
///
/// # Examples
/// ```
/// use gene_core::Edge;
///
/// let edge = Edge::new(5, 2)?;
/// assert_eq!((edge.source(), edge.target()), (2, 5));
/// assert_eq!(edge, Edge::new(2, 5)?);
/// assert!(Edge::new(3, 3).is_err());
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Builds the canonical edge joining `left` and `right`.
    ///
    /// # Errors
    /// Returns [`GeneError::SelfLoop`] when both endpoints are equal.
    pub fn new(left: usize, right: usize) -> Result<Self> {
        if left == right {
            return Err(GeneError::SelfLoop { node: left });
        }
        Ok(Self::canonical(left, right))
    }

    /// Orders the endpoints without checking for self-loops. Callers must
    /// guarantee `left != right`.
    pub(crate) const fn canonical(left: usize, right: usize) -> Self {
        if left <= right {
            Self {
                source: left,
                target: right,
            }
        } else {
            Self {
                source: right,
                target: left,
            }
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the endpoints as a `[source, target]` pair.
    #[must_use]
    #[rustfmt::skip]
    pub const fn as_array(&self) -> [usize; 2] { [self.source, self.target] }

    /// Returns `true` when `node` is one of the endpoints.
    #[must_use]
    pub const fn touches(&self, node: usize) -> bool {
        self.source == node || self.target == node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

impl TryFrom<(usize, usize)> for Edge {
    type Error = GeneError;

    fn try_from((left, right): (usize, usize)) -> Result<Self> {
        Self::new(left, right)
    }
}

impl From<Edge> for [usize; 2] {
    fn from(edge: Edge) -> Self {
        edge.as_array()
    }
}
