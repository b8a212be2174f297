//! Undirected simple graphs backed by hash-set adjacency lists.
//!
//! [`Graph`] keeps one neighbour set per node so edge membership tests are
//! O(1). The structure is symmetric by construction and never stores
//! self-loops.

mod edge;
#[cfg(test)]
mod tests;
pub(crate) mod union_find;

use std::collections::{HashSet, VecDeque};

use crate::{Result, error::GeneError};

pub use self::edge::Edge;
use self::union_find::UnionFind;

/// An undirected graph over nodes `0..node_count`.
///
/// # Examples
/// ```
/// use gene_core::Graph;
///
/// let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 0)])?;
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degree(1), 2);
/// assert_eq!(graph.component_count(), 2);
/// # Ok::<(), gene_core::GeneError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    neighbours: Vec<HashSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            neighbours: vec![HashSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an undirected edge list. Duplicate edges, in either
    /// orientation, collapse to a single edge.
    ///
    /// # Errors
    /// Returns [`GeneError::SelfLoop`] for an edge `(i, i)` and
    /// [`GeneError::NodeOutOfBounds`] for endpoints `>= node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(node_count);
        for (left, right) in edges {
            graph.insert_edge(Edge::new(left, right)?)?;
        }
        Ok(graph)
    }

    /// Builds a graph from a dense adjacency matrix where any non-zero entry
    /// marks an edge.
    ///
    /// The matrix must be square, symmetric, and carry a zero diagonal. Callers
    /// are expected to strip self-loops before handing matrices over; a
    /// non-zero diagonal is rejected rather than silently corrected.
    ///
    /// # Errors
    /// Returns [`GeneError::NonSquareMatrix`],
    /// [`GeneError::NonZeroDiagonal`], or [`GeneError::AsymmetricAdjacency`]
    /// when the corresponding requirement is violated.
    ///
    /// # Examples
    /// ```
    /// use gene_core::{GeneError, Graph};
    ///
    /// let graph = Graph::from_dense(&[[0_u8, 1], [1, 0]])?;
    /// assert_eq!(graph.edge_count(), 1);
    ///
    /// let err = Graph::from_dense(&[[1_u8, 0], [0, 0]]).expect_err("diagonal must be zero");
    /// assert!(matches!(err, GeneError::NonZeroDiagonal { node: 0 }));
    /// # Ok::<(), GeneError>(())
    /// ```
    pub fn from_dense<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let node_count = rows.len();
        for (row, values) in rows.iter().enumerate() {
            let len = values.as_ref().len();
            if len != node_count {
                return Err(GeneError::NonSquareMatrix {
                    row,
                    len,
                    expected: node_count,
                });
            }
        }

        let mut graph = Self::new(node_count);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values[row] != 0 {
                return Err(GeneError::NonZeroDiagonal { node: row });
            }
            for col in (row + 1)..node_count {
                let forward = values[col] != 0;
                let backward = rows[col].as_ref()[row] != 0;
                if forward != backward {
                    return Err(GeneError::AsymmetricAdjacency { row, col });
                }
                if forward {
                    graph.insert_edge(Edge::canonical(row, col))?;
                }
            }
        }
        Ok(graph)
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.neighbours.len() }

    /// Returns the number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Returns `true` when `edge` is present.
    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        self.neighbours
            .get(edge.source())
            .is_some_and(|set| set.contains(&edge.target()))
    }

    /// Returns `true` when `left` and `right` are adjacent.
    #[must_use]
    pub fn are_adjacent(&self, left: usize, right: usize) -> bool {
        left != right && self.contains(Edge::canonical(left, right))
    }

    /// Returns the degree of `node`, or zero when the node does not exist.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours.get(node).map_or(0, HashSet::len)
    }

    /// Returns the degree of every node, indexed by node id.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.neighbours.iter().map(HashSet::len).collect()
    }

    /// Iterates over the neighbours of `node` in unspecified order.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbours.get(node).into_iter().flatten().copied()
    }

    /// Inserts `edge`, returning `false` when it was already present.
    ///
    /// # Errors
    /// Returns [`GeneError::NodeOutOfBounds`] when an endpoint does not exist.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<bool> {
        let node_count = self.node_count();
        if edge.target() >= node_count {
            return Err(GeneError::NodeOutOfBounds {
                node: edge.target(),
                node_count,
            });
        }
        if !self.neighbours[edge.source()].insert(edge.target()) {
            return Ok(false);
        }
        self.neighbours[edge.target()].insert(edge.source());
        self.edge_count += 1;
        Ok(true)
    }

    /// Removes `edge`, returning `false` when it was absent.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        let removed = self
            .neighbours
            .get_mut(edge.source())
            .is_some_and(|set| set.remove(&edge.target()));
        if removed {
            self.neighbours[edge.target()].remove(&edge.source());
            self.edge_count -= 1;
        }
        removed
    }

    /// Returns every edge once, in ascending canonical order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .neighbours
            .iter()
            .enumerate()
            .flat_map(|(source, set)| {
                set.iter()
                    .filter(move |&&target| source < target)
                    .map(move |&target| Edge::canonical(source, target))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Counts connected components. Isolated nodes form their own component.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.union_find().components()
    }

    /// Labels each node with a component id in `0..component_count`, numbered
    /// in order of each component's smallest node.
    #[must_use]
    pub fn component_labels(&self) -> Vec<usize> {
        let mut sets = self.union_find();
        let mut root_labels = vec![usize::MAX; self.node_count()];
        let mut next = 0;
        (0..self.node_count())
            .map(|node| {
                let root = sets.find(node);
                if root_labels[root] == usize::MAX {
                    root_labels[root] = next;
                    next += 1;
                }
                root_labels[root]
            })
            .collect()
    }

    /// Returns `true` when a path joins `from` and `to`.
    #[must_use]
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        if from >= self.node_count() || to >= self.node_count() {
            return false;
        }
        if from == to {
            return true;
        }

        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([from]);
        visited[from] = true;
        while let Some(node) = queue.pop_front() {
            for next in self.neighbours(node) {
                if next == to {
                    return true;
                }
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Breadth-first hop distances from `source`; unreachable nodes map to
    /// `None`.
    #[must_use]
    pub fn hop_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.node_count()];
        let Some(slot) = distances.get_mut(source) else {
            return distances;
        };
        *slot = Some(0);

        let mut queue = VecDeque::from([(source, 0_usize)]);
        while let Some((node, hops)) = queue.pop_front() {
            for next in self.neighbours(node) {
                if distances[next].is_none() {
                    distances[next] = Some(hops + 1);
                    queue.push_back((next, hops + 1));
                }
            }
        }
        distances
    }

    /// Builds the subgraph induced by `nodes`, relabelling `nodes[k]` as `k`.
    ///
    /// # Errors
    /// Returns [`GeneError::NodeOutOfBounds`] when a node does not exist.
    pub fn induced_subgraph(&self, nodes: &[usize]) -> Result<Self> {
        let mut relabel = vec![None; self.node_count()];
        for (new_id, &node) in nodes.iter().enumerate() {
            let slot = relabel
                .get_mut(node)
                .ok_or(GeneError::NodeOutOfBounds {
                    node,
                    node_count: self.node_count(),
                })?;
            *slot = Some(new_id);
        }

        let mut subgraph = Self::new(nodes.len());
        for edge in self.edges() {
            if let (Some(source), Some(target)) = (relabel[edge.source()], relabel[edge.target()])
            {
                subgraph.insert_edge(Edge::canonical(source, target))?;
            }
        }
        Ok(subgraph)
    }

    /// Renders the graph as a dense symmetric 0/1 matrix with a zero diagonal.
    #[must_use]
    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        let node_count = self.node_count();
        let mut dense = vec![vec![0_u8; node_count]; node_count];
        for (node, set) in self.neighbours.iter().enumerate() {
            for &neighbour in set {
                dense[node][neighbour] = 1;
            }
        }
        dense
    }

    fn union_find(&self) -> UnionFind {
        let mut sets = UnionFind::new(self.node_count());
        for (source, set) in self.neighbours.iter().enumerate() {
            for &target in set {
                if source < target {
                    sets.union(source, target);
                }
            }
        }
        sets
    }
}
