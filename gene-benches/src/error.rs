//! Benchmark setup error type.

use crate::source::SyntheticError;
use gene_core::GeneError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A core graph operation failed.
    #[error("graph operation failed: {0}")]
    Gene(#[from] GeneError),
}
