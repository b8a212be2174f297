//! Unit tests for the adjacency-list graph and canonical edges.

use proptest::prelude::*;
use rstest::rstest;

use crate::{error::GeneError, test_utils::{cycle_graph, suite_proptest_config}};

use super::{Edge, Graph};

#[rstest]
#[case(0, 1)]
#[case(7, 3)]
#[case(2, 9)]
fn edge_canonicalisation_orders_endpoints(#[case] left: usize, #[case] right: usize) {
    let edge = Edge::new(left, right).expect("distinct endpoints are valid");
    assert!(edge.source() < edge.target());
    assert_eq!(edge, Edge::new(right, left).expect("reverse is valid"));
}

#[test]
fn edge_rejects_self_loops() {
    let err = Edge::new(4, 4).expect_err("self-loops are invalid");
    assert_eq!(err, GeneError::SelfLoop { node: 4 });
}

#[test]
fn from_edges_collapses_duplicates() {
    let graph = Graph::from_edges(3, [(0, 1), (1, 0), (1, 2)]).expect("edges are valid");
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.degrees(), vec![1, 2, 1]);
    assert_eq!(
        graph.edges(),
        vec![Edge::canonical(0, 1), Edge::canonical(1, 2)]
    );
}

#[test]
fn from_edges_rejects_out_of_bounds_nodes() {
    let err = Graph::from_edges(3, [(0, 3)]).expect_err("node 3 does not exist");
    assert_eq!(
        err,
        GeneError::NodeOutOfBounds {
            node: 3,
            node_count: 3
        }
    );
}

#[rstest]
#[case::ragged(vec![vec![0, 1], vec![1]], GeneError::NonSquareMatrix { row: 1, len: 1, expected: 2 })]
#[case::diagonal(vec![vec![0, 1], vec![1, 1]], GeneError::NonZeroDiagonal { node: 1 })]
#[case::asymmetric(vec![vec![0, 1, 0], vec![0, 0, 0], vec![0, 0, 0]], GeneError::AsymmetricAdjacency { row: 0, col: 1 })]
fn from_dense_rejects_invalid_matrices(#[case] rows: Vec<Vec<u8>>, #[case] expected: GeneError) {
    let err = Graph::from_dense(&rows).expect_err("matrix is invalid");
    assert_eq!(err, expected);
}

#[test]
fn dense_round_trip_preserves_edges() {
    let graph = cycle_graph(5);
    let rebuilt = Graph::from_dense(&graph.to_dense()).expect("dense output is valid input");
    assert_eq!(rebuilt, graph);
}

#[test]
fn removing_a_cycle_edge_keeps_endpoints_reachable() {
    let mut graph = cycle_graph(6);
    assert!(graph.remove_edge(Edge::canonical(0, 1)));
    assert!(graph.is_reachable(0, 1));
    assert_eq!(graph.component_count(), 1);

    assert!(graph.remove_edge(Edge::canonical(3, 4)));
    assert!(!graph.is_reachable(0, 3));
    assert!(graph.is_reachable(0, 4));
    assert_eq!(graph.component_count(), 2);
    assert!(!graph.remove_edge(Edge::canonical(3, 4)));
}

#[test]
fn component_labels_follow_smallest_node_order() {
    let graph = Graph::from_edges(6, [(4, 5), (0, 2), (1, 3)]).expect("edges are valid");
    assert_eq!(graph.component_labels(), vec![0, 1, 0, 1, 2, 2]);
}

#[test]
fn hop_distances_mark_unreachable_nodes() {
    let graph = Graph::from_edges(4, [(0, 1), (1, 2)]).expect("edges are valid");
    assert_eq!(graph.hop_distances(0), vec![Some(0), Some(1), Some(2), None]);
    assert!(graph.hop_distances(9).iter().all(Option::is_none));
}

#[test]
fn induced_subgraph_relabels_nodes() {
    let graph = cycle_graph(5);
    let sub = graph.induced_subgraph(&[4, 0, 1]).expect("nodes exist");
    assert_eq!(sub.node_count(), 3);
    assert!(sub.are_adjacent(0, 1));
    assert!(sub.are_adjacent(1, 2));
    assert!(!sub.are_adjacent(0, 2));
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn canonicalisation_is_idempotent(left in 0_usize..1_000, right in 0_usize..1_000) {
        prop_assume!(left != right);
        let edge = Edge::new(left, right).expect("distinct endpoints");
        let again = Edge::new(edge.source(), edge.target()).expect("distinct endpoints");
        prop_assert_eq!(edge, again);
        prop_assert_eq!(edge, Edge::new(right, left).expect("distinct endpoints"));
    }

    #[test]
    fn degree_sum_is_twice_edge_count(
        pairs in proptest::collection::vec((0_usize..12, 0_usize..12), 0..40),
    ) {
        let graph = Graph::from_edges(12, pairs.into_iter().filter(|(a, b)| a != b))
            .expect("filtered pairs are valid");
        prop_assert_eq!(graph.degrees().iter().sum::<usize>(), 2 * graph.edge_count());
        let dense = graph.to_dense();
        for (i, row) in dense.iter().enumerate() {
            prop_assert_eq!(row[i], 0);
            for (j, value) in row.iter().enumerate() {
                prop_assert_eq!(*value, dense[j][i]);
            }
        }
    }
}
