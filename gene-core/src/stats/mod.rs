//! Classical graph statistics for comparing real and synthesised graphs.
//!
//! Undefined quantities (for example the clustering coefficient of a graph
//! without wedges) are reported as `None` rather than NaN.

mod overlap;

use tracing::{debug, instrument};

use crate::graph::Graph;

pub use self::overlap::LinkOverlap;

const ENTROPY_DEGREE_OFFSET: f64 = 1.0e-4;

/// Summary statistics of an undirected graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStatistics {
    /// Largest node degree.
    pub max_degree: usize,
    /// Smallest node degree.
    pub min_degree: usize,
    /// Mean node degree.
    pub mean_degree: f64,
    /// Node count of the largest connected component.
    pub largest_component_size: usize,
    /// Paths of length two, `sum d (d - 1) / 2`.
    pub wedge_count: f64,
    /// Three-edge stars, `sum d (d - 1) (d - 2) / 6`.
    pub claw_count: f64,
    /// Triangles.
    pub triangle_count: usize,
    /// Four-node cliques.
    pub square_count: usize,
    /// Continuous maximum-likelihood power-law exponent of the degrees.
    pub power_law_exponent: Option<f64>,
    /// Gini coefficient of the degree distribution.
    pub gini: Option<f64>,
    /// Relative edge distribution entropy.
    pub edge_distribution_entropy: Option<f64>,
    /// Degree assortativity coefficient.
    pub assortativity: Option<f64>,
    /// Global clustering coefficient, `3 * triangles / wedges`.
    pub clustering_coefficient: Option<f64>,
    /// Connected components, isolated nodes included.
    pub component_count: usize,
    /// Mean shortest-path length over connected ordered node pairs.
    pub characteristic_path_length: Option<f64>,
}

/// Computes every [`GraphStatistics`] field for `graph`.
///
/// # Examples
/// ```
/// use gene_core::{Graph, compute_graph_statistics};
///
/// let triangle = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)])?;
/// let stats = compute_graph_statistics(&triangle);
/// assert_eq!(stats.triangle_count, 1);
/// assert_eq!(stats.clustering_coefficient, Some(1.0));
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[must_use]
#[instrument(
    name = "stats.compute",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn compute_graph_statistics(graph: &Graph) -> GraphStatistics {
    let degrees = graph.degrees();
    let triangle_count = triangle_count(graph);
    let wedge_count = degrees
        .iter()
        .map(|&d| binomial(d, 2))
        .sum::<f64>();
    let stats = GraphStatistics {
        max_degree: degrees.iter().copied().max().unwrap_or(0),
        min_degree: degrees.iter().copied().min().unwrap_or(0),
        mean_degree: mean(&degrees).unwrap_or(0.0),
        largest_component_size: largest_connected_component(graph).len(),
        wedge_count,
        claw_count: degrees.iter().map(|&d| binomial(d, 3)).sum(),
        triangle_count,
        square_count: square_count(graph),
        power_law_exponent: power_law_exponent(&degrees),
        gini: gini(&degrees),
        edge_distribution_entropy: edge_distribution_entropy(&degrees),
        assortativity: assortativity(graph),
        clustering_coefficient: clustering_coefficient(triangle_count, wedge_count),
        component_count: graph.component_count(),
        characteristic_path_length: characteristic_path_length(graph),
    };
    debug!(?stats, "graph statistics computed");
    stats
}

/// Nodes of the largest connected component in ascending order. Ties go to
/// the component containing the smallest node.
///
/// # Examples
/// ```
/// use gene_core::{Graph, largest_connected_component};
///
/// let graph = Graph::from_edges(5, [(0, 1), (2, 3), (3, 4)])?;
/// assert_eq!(largest_connected_component(&graph), vec![2, 3, 4]);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[must_use]
pub fn largest_connected_component(graph: &Graph) -> Vec<usize> {
    let labels = graph.component_labels();
    let mut sizes = vec![0_usize; labels.iter().copied().max().map_or(0, |max| max + 1)];
    for &label in &labels {
        sizes[label] += 1;
    }
    let Some(largest) = sizes
        .iter()
        .enumerate()
        .max_by(|(a_label, a), (b_label, b)| a.cmp(b).then_with(|| b_label.cmp(a_label)))
        .map(|(label, _)| label)
    else {
        return Vec::new();
    };
    labels
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label == largest)
        .map(|(node, _)| node)
        .collect()
}

/// Each triangle counted once, via its lowest edge `(u, v)` and apex `w > v`.
fn triangle_count(graph: &Graph) -> usize {
    graph
        .edges()
        .into_iter()
        .map(|edge| {
            graph
                .neighbours(edge.source())
                .filter(|&w| w > edge.target() && graph.are_adjacent(edge.target(), w))
                .count()
        })
        .sum()
}

fn square_count(graph: &Graph) -> usize {
    let mut count = 0;
    for edge in graph.edges() {
        let (u, v) = (edge.source(), edge.target());
        let apexes: Vec<usize> = graph
            .neighbours(u)
            .filter(|&w| w > v && graph.are_adjacent(v, w))
            .collect();
        for &w in &apexes {
            count += apexes
                .iter()
                .filter(|&&x| x > w && graph.are_adjacent(w, x))
                .count();
        }
    }
    count
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n.saturating_sub(i)) as f64 / (i + 1) as f64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn power_law_exponent(degrees: &[usize]) -> Option<f64> {
    let x_min = degrees.iter().copied().min()?.max(1) as f64;
    let tail: Vec<f64> = degrees
        .iter()
        .map(|&d| d as f64)
        .filter(|&d| d >= x_min)
        .collect();
    let log_sum: f64 = tail.iter().map(|d| (d / x_min).ln()).sum();
    if log_sum <= 0.0 {
        return None;
    }
    Some(1.0 + tail.len() as f64 / log_sum)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn gini(degrees: &[usize]) -> Option<f64> {
    let total: usize = degrees.iter().sum();
    if total == 0 {
        return None;
    }
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable();
    let n = sorted.len() as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(rank, &d)| rank as f64 * d as f64)
        .sum();
    Some(2.0 * weighted / (n * total as f64) - (n + 1.0) / n)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn edge_distribution_entropy(degrees: &[usize]) -> Option<f64> {
    let stubs = degrees.iter().sum::<usize>() as f64;
    if degrees.len() < 2 || stubs == 0.0 {
        return None;
    }
    let entropy: f64 = degrees
        .iter()
        .map(|&d| {
            let share = d as f64 / stubs;
            -share * ((d as f64 + ENTROPY_DEGREE_OFFSET) / stubs).ln()
        })
        .sum();
    Some(entropy / (degrees.len() as f64).ln())
}

/// Pearson correlation of degrees across both orientations of every edge.
#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn assortativity(graph: &Graph) -> Option<f64> {
    let edges = graph.edges();
    if edges.is_empty() {
        return None;
    }
    let ends = 2.0 * edges.len() as f64;
    let (mut sum, mut sum_sq, mut sum_product) = (0.0, 0.0, 0.0);
    for edge in &edges {
        let a = graph.degree(edge.source()) as f64;
        let b = graph.degree(edge.target()) as f64;
        sum += a + b;
        sum_sq += a * a + b * b;
        sum_product += 2.0 * a * b;
    }
    let mean = sum / ends;
    let variance = sum_sq / ends - mean * mean;
    if variance.abs() < f64::EPSILON {
        return None;
    }
    Some((sum_product / ends - mean * mean) / variance)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn clustering_coefficient(triangles: usize, wedges: f64) -> Option<f64> {
    (wedges > 0.0).then(|| 3.0 * triangles as f64 / wedges)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "statistics are reported as floating-point values"
)]
fn characteristic_path_length(graph: &Graph) -> Option<f64> {
    let (mut total, mut pairs) = (0_usize, 0_usize);
    for source in 0..graph.node_count() {
        for hops in graph.hop_distances(source).into_iter().flatten() {
            if hops > 0 {
                total += hops;
                pairs += 1;
            }
        }
    }
    (pairs > 0).then(|| total as f64 / pairs as f64)
}
