//! Benchmark support crate for gene.
//!
//! Provides seeded synthetic graphs and probability matrices, plus parameter
//! types, for the Criterion benchmarks of edge splitting, top-k selection,
//! and degree-constrained reconstruction.

pub mod error;
pub mod params;
pub mod source;
