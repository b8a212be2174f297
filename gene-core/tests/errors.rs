//! Stable error codes.

use gene_core::{GeneError, GeneErrorCode, SplitKind};
use rstest::rstest;

#[rstest]
#[case(GeneError::NonSquareMatrix { row: 0, len: 1, expected: 2 }, GeneErrorCode::NonSquareMatrix, "GENE_NON_SQUARE_MATRIX")]
#[case(GeneError::NonZeroDiagonal { node: 1 }, GeneErrorCode::NonZeroDiagonal, "GENE_NON_ZERO_DIAGONAL")]
#[case(GeneError::AsymmetricAdjacency { row: 0, col: 1 }, GeneErrorCode::AsymmetricAdjacency, "GENE_ASYMMETRIC_ADJACENCY")]
#[case(GeneError::SelfLoop { node: 3 }, GeneErrorCode::SelfLoop, "GENE_SELF_LOOP")]
#[case(GeneError::NodeOutOfBounds { node: 9, node_count: 4 }, GeneErrorCode::NodeOutOfBounds, "GENE_NODE_OUT_OF_BOUNDS")]
#[case(
    GeneError::DimensionMismatch { what: "probability matrix", expected: 3, actual: 4 },
    GeneErrorCode::DimensionMismatch,
    "GENE_DIMENSION_MISMATCH",
)]
#[case(
    GeneError::InvalidProbability { row: 0, col: 1, value: 1.5 },
    GeneErrorCode::InvalidProbability,
    "GENE_INVALID_PROBABILITY",
)]
#[case(
    GeneError::InvalidConfiguration { reason: "bad".into() },
    GeneErrorCode::InvalidConfiguration,
    "GENE_INVALID_CONFIGURATION",
)]
#[case(
    GeneError::ConnectivityViolated { expected: 1, actual: 2 },
    GeneErrorCode::ConnectivityViolated,
    "GENE_CONNECTIVITY_VIOLATED",
)]
#[case(
    GeneError::NegativeSamplingExhausted { split: SplitKind::Train, accepted: 1, requested: 4, attempts: 10 },
    GeneErrorCode::NegativeSamplingExhausted,
    "GENE_NEGATIVE_SAMPLING_EXHAUSTED",
)]
#[case(
    GeneError::Scorer { node: 2, reason: "offline".into() },
    GeneErrorCode::ScorerFailure,
    "GENE_SCORER_FAILURE",
)]
#[case(
    GeneError::InvariantViolation { invariant: "symmetry" },
    GeneErrorCode::InvariantViolation,
    "GENE_INVARIANT_VIOLATION",
)]
fn errors_map_to_stable_codes(
    #[case] error: GeneError,
    #[case] expected: GeneErrorCode,
    #[case] code: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(expected.as_str(), code);
    assert_eq!(expected.to_string(), code);
}

#[rstest]
#[case(GeneError::ConnectivityViolated { expected: 1, actual: 3 }, true)]
#[case(GeneError::InvariantViolation { invariant: "disjoint splits" }, true)]
#[case(GeneError::SelfLoop { node: 0 }, false)]
#[case(
    GeneError::NegativeSamplingExhausted { split: SplitKind::Test, accepted: 0, requested: 20, attempts: 0 },
    false,
)]
fn invariant_violations_are_classified(#[case] error: GeneError, #[case] expected: bool) {
    assert_eq!(error.is_invariant_violation(), expected);
}

#[test]
fn messages_name_the_split() {
    let error = GeneError::NegativeSamplingExhausted {
        split: SplitKind::Validation,
        accepted: 2,
        requested: 5,
        attempts: 10_000,
    };
    assert_eq!(
        error.to_string(),
        "negative sampling for the validation split accepted 2 of 5 pairs before exhausting \
         10000 attempts"
    );
}
