//! Integration tests for connectivity-preserving edge splits.

mod common;

use std::collections::HashSet;

use gene_core::{Edge, GeneError, Graph, SplitConfig, SplitKind, split_edges};
use gene_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use common::{barbell, complete, cycle};

#[rstest]
#[case(1)]
#[case(2)]
#[case(0xDEAD_BEEF)]
fn six_cycle_holds_out_one_edge_and_stays_connected(#[case] seed: u64) {
    let graph = cycle(6);
    let config = SplitConfig::new(0.2, 0.0)
        .expect("fractions are valid")
        .with_test_negative_ratio(2)
        .with_train_negative_ratio(1)
        .with_rng_seed(seed);
    let split = split_edges(&graph, &config).expect("split succeeds");

    assert_eq!(split.positives(SplitKind::Test).len(), 1);
    assert_eq!(split.train_graph().edge_count(), 5);
    assert_eq!(split.train_graph().component_count(), 1);
    assert_eq!(split.negatives(SplitKind::Test).len(), 2);
    assert_eq!(split.negatives(SplitKind::Train).len(), 5);
    assert!(!split.shortfall().is_degraded());
}

#[test]
fn complete_graph_negatives_exhaust_without_hanging() {
    let config = SplitConfig::new(0.2, 0.0).expect("fractions are valid");
    let err = split_edges(&complete(5), &config).expect_err("K5 has no non-edges");
    assert!(matches!(
        err,
        GeneError::NegativeSamplingExhausted {
            split: SplitKind::Test,
            accepted: 0,
            ..
        }
    ));
    assert_eq!(err.code().as_str(), "GENE_NEGATIVE_SAMPLING_EXHAUSTED");
}

#[test]
fn bridges_are_never_held_out() {
    let graph = barbell();
    let config = SplitConfig::new(0.5, 0.2)
        .expect("fractions are valid")
        .with_test_negative_ratio(1)
        .with_train_negative_ratio(0);
    let bridge = Edge::new(2, 3).expect("distinct endpoints");
    for seed in 0..16 {
        let split = split_edges(&graph, &config.clone().with_rng_seed(seed)).expect("split succeeds");
        assert!(split.positives(SplitKind::Train).contains(&bridge));
        assert_eq!(split.train_graph().component_count(), 1);
    }
}

#[test]
fn positives_and_negatives_partition_cleanly() {
    let graph = Graph::from_edges(
        12,
        (0..12).flat_map(|i| [(i, (i + 1) % 12), (i, (i + 3) % 12)]),
    )
    .expect("edges are valid");
    let config = SplitConfig::new(0.25, 0.1)
        .expect("fractions are valid")
        .with_test_negative_ratio(1)
        .with_train_negative_ratio(1)
        .with_rng_seed(5);
    let split = split_edges(&graph, &config).expect("split succeeds");

    let mut positives = HashSet::new();
    let mut negatives = HashSet::new();
    for kind in SplitKind::SAMPLING_ORDER {
        for edge in split.positives(kind) {
            assert!(positives.insert(*edge), "{edge} appears in two positive splits");
        }
        for edge in split.negatives(kind) {
            assert!(negatives.insert(*edge), "{edge} appears in two negative splits");
            assert!(!graph.contains(*edge));
        }
    }
    assert_eq!(positives.len(), graph.edge_count());
    assert!(positives.is_disjoint(&negatives));
    assert_eq!(split.train_adjacency(), split.train_graph().to_dense());
}

#[test]
fn shortfall_is_logged_as_a_warning() {
    let path = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]).expect("edges are valid");
    let config = SplitConfig::new(0.5, 0.0)
        .expect("fractions are valid")
        .with_test_negative_ratio(1)
        .with_train_negative_ratio(0);
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let split = tracing::subscriber::with_default(subscriber, || split_edges(&path, &config))
        .expect("degraded splits still succeed");
    assert_eq!(split.shortfall().missing_test(), 2);

    let warnings = layer.warnings();
    let warning = warnings
        .iter()
        .find(|event| event.message() == Some("not enough removable edges to perform the full split"))
        .expect("shortfall warning must be emitted");
    assert_eq!(warning.field("test_requested"), Some("2"));
    assert_eq!(warning.field("test_returned"), Some("0"));
    assert!(layer.span_names().iter().any(|name| name == "split.edges"));
}
