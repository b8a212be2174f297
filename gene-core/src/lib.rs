//! Gene core library.
//!
//! Graph algorithms for link-prediction experiments and degree-constrained
//! graph synthesis: connectivity-preserving edge splits, streaming top-k edge
//! selection, revised Havel-Hakimi reconstruction, and graph statistics.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod graph;
mod probability;
mod reconstruct;
mod split;
mod stats;
mod synthesis;
mod topk;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{GeneError, GeneErrorCode, Result},
    graph::{Edge, Graph},
    probability::{
        EmbeddingGenerator, EmbeddingModel, Embeddings, HadamardLinkScorer, LinkHead, LinkScorer,
        ProbabilityMatrix, generate_probability_matrix,
    },
    reconstruct::{DegreeTargets, Reconstruction, Reconstructor, Termination},
    split::{EdgeSplit, SplitConfig, SplitKind, SplitShortfall, split_edges},
    stats::{GraphStatistics, LinkOverlap, compute_graph_statistics, largest_connected_component},
    synthesis::{GraphSynthesizer, Synthesis},
    topk::{RankedReconstruction, ScoredPair, reconstruct_top_k, select_top_k},
};
