//! End-to-end graph synthesis.
//!
//! A real graph supplies the degree multiset and the edge budget; a
//! probability matrix from a generative model supplies both the synthetic
//! degree signal (through top-k reconstruction) and the edge preferences used
//! by the degree-constrained reconstructor.

use tracing::{info, instrument};

use crate::{
    Result,
    error::GeneError,
    graph::Graph,
    probability::{
        EmbeddingGenerator, HadamardLinkScorer, LinkHead, ProbabilityMatrix,
        generate_probability_matrix,
    },
    reconstruct::{DegreeTargets, Reconstruction, Reconstructor},
    topk::{RankedReconstruction, reconstruct_top_k},
};

/// Output of [`GraphSynthesizer::synthesize`].
#[derive(Clone, Debug)]
pub struct Synthesis {
    ranked: RankedReconstruction,
    targets: DegreeTargets,
    reconstruction: Reconstruction,
}

impl Synthesis {
    /// Top-k graph whose degrees form the synthetic ranking signal.
    #[must_use]
    #[rustfmt::skip]
    pub const fn ranked(&self) -> &RankedReconstruction { &self.ranked }

    /// Real degrees rank-joined onto the synthetic signal.
    #[must_use]
    #[rustfmt::skip]
    pub const fn targets(&self) -> &DegreeTargets { &self.targets }

    /// Degree-constrained reconstruction result.
    #[must_use]
    #[rustfmt::skip]
    pub const fn reconstruction(&self) -> &Reconstruction { &self.reconstruction }

    /// The synthesised graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        self.reconstruction.graph()
    }
}

/// Runs the synthesis pipeline with a configured [`Reconstructor`].
///
/// # Examples
/// ```
/// use gene_core::{Graph, GraphSynthesizer, ProbabilityMatrix};
///
/// let real = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)])?;
/// let probability = ProbabilityMatrix::from_fn(4, |i, j| {
///     if i.abs_diff(j) == 1 { 0.9 } else if i == j { 0.0 } else { 0.1 }
/// })?;
/// let synthesis = GraphSynthesizer::default().synthesize(&real, &probability)?;
/// assert_eq!(synthesis.graph(), &real);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphSynthesizer {
    reconstructor: Reconstructor,
}

impl GraphSynthesizer {
    /// Creates a synthesiser around `reconstructor`.
    #[must_use]
    pub const fn new(reconstructor: Reconstructor) -> Self {
        Self { reconstructor }
    }

    /// The reconstructor used for allocation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn reconstructor(&self) -> &Reconstructor { &self.reconstructor }

    /// Synthesises a graph shaped like `real` from `probability`.
    ///
    /// The top `real.edge_count()` pairs of `probability` yield a synthetic
    /// degree signal; the real degree multiset is rank-joined onto it and
    /// realised by the reconstructor.
    ///
    /// # Errors
    /// Returns [`GeneError::DimensionMismatch`] when the matrix and graph
    /// cover different node counts, and any reconstruction error.
    #[instrument(
        name = "synthesis.run",
        err,
        skip(self, real, probability),
        fields(nodes = real.node_count(), edges = real.edge_count()),
    )]
    pub fn synthesize(&self, real: &Graph, probability: &ProbabilityMatrix) -> Result<Synthesis> {
        if probability.node_count() != real.node_count() {
            return Err(GeneError::DimensionMismatch {
                what: "probability matrix",
                expected: real.node_count(),
                actual: probability.node_count(),
            });
        }

        let ranked = reconstruct_top_k(probability, real.edge_count())?;
        let targets = DegreeTargets::by_rank(&real.degrees(), &ranked.degree_sequence())?;
        let reconstruction = self.reconstructor.reconstruct(&targets, probability)?;
        info!(
            placed = reconstruction.placed(),
            requested = reconstruction.requested(),
            "synthesis complete"
        );
        Ok(Synthesis {
            ranked,
            targets,
            reconstruction,
        })
    }

    /// Draws one synthetic embedding per node of `real` from `generator`,
    /// scores them with `head`, and synthesises from the resulting matrix.
    ///
    /// # Errors
    /// Returns generator and scorer failures, a
    /// [`GeneError::DimensionMismatch`] when the generator returns the wrong
    /// number of embeddings or width, and any synthesis error.
    pub fn synthesize_from_generator<G>(
        &self,
        real: &Graph,
        generator: &mut G,
        head: &LinkHead,
    ) -> Result<Synthesis>
    where
        G: EmbeddingGenerator + ?Sized,
    {
        let embeddings = generator.generate_embeddings(real.node_count())?;
        if embeddings.len() != real.node_count() {
            return Err(GeneError::DimensionMismatch {
                what: "generated embeddings",
                expected: real.node_count(),
                actual: embeddings.len(),
            });
        }
        let scorer = HadamardLinkScorer::new(embeddings, head.clone())?;
        let probability = generate_probability_matrix(&scorer)?;
        self.synthesize(real, &probability)
    }
}
