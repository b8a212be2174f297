//! Error types for the gene core library.
//!
//! Defines the error enum exposed by the public API, stable machine-readable
//! codes for each variant, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::split::SplitKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by graph construction, edge splitting, and
/// reconstruction.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeneError {
    /// A dense adjacency or probability matrix row had the wrong length.
    #[error("matrix row {row} has {len} columns but {expected} were expected")]
    NonSquareMatrix {
        /// Index of the offending row.
        row: usize,
        /// Number of columns found in the row.
        len: usize,
        /// Number of columns required for a square matrix.
        expected: usize,
    },
    /// A dense adjacency matrix carried a non-zero diagonal entry.
    #[error("adjacency matrix has a non-zero diagonal entry at node {node}")]
    NonZeroDiagonal {
        /// Node whose diagonal entry was set.
        node: usize,
    },
    /// A dense adjacency matrix was not symmetric.
    #[error("adjacency matrix is asymmetric at ({row}, {col})")]
    AsymmetricAdjacency {
        /// Row of the first mismatching entry.
        row: usize,
        /// Column of the first mismatching entry.
        col: usize,
    },
    /// An edge joined a node to itself.
    #[error("edge ({node}, {node}) is a self-loop")]
    SelfLoop {
        /// Node carrying the self-loop.
        node: usize,
    },
    /// A node id was outside the graph.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Two inputs that must describe the same node set disagreed in size.
    #[error("{what} has length {actual} but {expected} was expected")]
    DimensionMismatch {
        /// Name of the mismatching input.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// A probability was non-finite or outside `[0, 1]`.
    #[error("probability at ({row}, {col}) is {value}; expected a finite value in [0, 1]")]
    InvalidProbability {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The rejected value.
        value: f64,
    },
    /// A configuration value was rejected during validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the rejected value.
        reason: String,
    },
    /// Removing edges disconnected the graph despite the connectivity guard.
    #[error("edge split changed the component count from {expected} to {actual}")]
    ConnectivityViolated {
        /// Component count of the input graph.
        expected: usize,
        /// Component count of the retained training graph.
        actual: usize,
    },
    /// Rejection sampling could not find enough non-edges within its budget.
    #[error(
        "negative sampling for the {split} split accepted {accepted} of {requested} pairs \
         before exhausting {attempts} attempts"
    )]
    NegativeSamplingExhausted {
        /// Split whose negatives were being drawn.
        split: SplitKind,
        /// Pairs accepted before the budget ran out.
        accepted: usize,
        /// Pairs requested for the split.
        requested: usize,
        /// Draws consumed, accepted or not.
        attempts: u64,
    },
    /// A link scorer failed to produce scores.
    #[error("link scorer failed for node {node}: {reason}")]
    Scorer {
        /// Node whose scores were requested.
        node: usize,
        /// Description supplied by the scorer.
        reason: String,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("invariant violated: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant.
        invariant: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`GeneError`] variants.
    enum GeneErrorCode for GeneError {
        /// A matrix row had the wrong length.
        NonSquareMatrix => NonSquareMatrix { .. } => "GENE_NON_SQUARE_MATRIX",
        /// A dense adjacency matrix carried a non-zero diagonal entry.
        NonZeroDiagonal => NonZeroDiagonal { .. } => "GENE_NON_ZERO_DIAGONAL",
        /// A dense adjacency matrix was not symmetric.
        AsymmetricAdjacency => AsymmetricAdjacency { .. } => "GENE_ASYMMETRIC_ADJACENCY",
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GENE_SELF_LOOP",
        /// A node id was outside the graph.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GENE_NODE_OUT_OF_BOUNDS",
        /// Two inputs disagreed in size.
        DimensionMismatch => DimensionMismatch { .. } => "GENE_DIMENSION_MISMATCH",
        /// A probability was non-finite or outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "GENE_INVALID_PROBABILITY",
        /// A configuration value was rejected.
        InvalidConfiguration => InvalidConfiguration { .. } => "GENE_INVALID_CONFIGURATION",
        /// The edge split disconnected the graph.
        ConnectivityViolated => ConnectivityViolated { .. } => "GENE_CONNECTIVITY_VIOLATED",
        /// Negative sampling ran out of attempts.
        NegativeSamplingExhausted => NegativeSamplingExhausted { .. } => "GENE_NEGATIVE_SAMPLING_EXHAUSTED",
        /// A link scorer failed.
        ScorerFailure => Scorer { .. } => "GENE_SCORER_FAILURE",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "GENE_INVARIANT_VIOLATION",
    }
}

impl GeneError {
    /// Returns `true` for errors that indicate broken internal invariants
    /// rather than bad caller input or exhausted resources.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::ConnectivityViolated { .. } | Self::InvariantViolation { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GeneError>;
