//! Tests for graph derivation: layout bands, deduplication, edge labels,
//! and build memoization.

use rstest::rstest;

use crate::domain::{FlowDataset, RawRecord, TransactionRecord};

use super::builder::{ANCHOR_POSITION, GraphBuilder, build_graph};
use super::types::{DEFAULT_WALLET_ID, Position};

// ========================================================================
// Test Helper Functions
// ========================================================================

/// Creates a normalized record with the given counterparty.
fn record(address: &str, amount: f64, date: &str) -> TransactionRecord {
    TransactionRecord {
        counterparty_address: Some(address.to_string()),
        amount,
        date: date.to_string(),
        entity_name: "Unknown".to_string(),
        token_type: "BTC".to_string(),
        transaction_type: "Normal Tx".to_string(),
        sub_transactions: Vec::new(),
    }
}

/// Creates a record whose counterparty address is missing.
fn record_without_address(amount: f64) -> TransactionRecord {
    TransactionRecord {
        counterparty_address: None,
        ..record("", amount, "N/A")
    }
}

/// Creates a raw dataset for the memoizing-builder tests.
fn dataset(addresses: &[(&str, f64)], field: &str) -> FlowDataset {
    FlowDataset {
        message: "success".to_string(),
        data: addresses
            .iter()
            .map(|(address, amount)| {
                let mut raw = RawRecord {
                    amount: Some(*amount),
                    date: Some("2022-07-17 14:10:09".to_string()),
                    ..RawRecord::default()
                };
                match field {
                    "beneficiary_address" => raw.beneficiary_address = Some(address.to_string()),
                    _ => raw.payer_address = Some(address.to_string()),
                }
                raw
            })
            .collect(),
    }
}

fn outflow_dataset(addresses: &[(&str, f64)]) -> FlowDataset {
    dataset(addresses, "beneficiary_address")
}

fn inflow_dataset(addresses: &[(&str, f64)]) -> FlowDataset {
    dataset(addresses, "payer_address")
}

// ========================================================================
// Scenario Tests
// ========================================================================

#[test]
fn test_scenario_one_counterparty_each_side() {
    let graph = build_graph(
        "W",
        &[record("X", 1.5, "2022-07-13 00:35:37")],
        &[record("Y", 0.3, "2022-07-17 14:10:09")],
    );

    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.node("W").is_some());
    assert!(graph.node("X").is_some());
    assert!(graph.node("Y").is_some());

    assert_eq!(graph.edges.len(), 2);
    let outflow_edge = graph.edge_between("X", "W").expect("X->W edge");
    assert_eq!(outflow_edge.label, "1.5 / 2022-07-13 00:35:37");
    let inflow_edge = graph.edge_between("W", "Y").expect("W->Y edge");
    assert_eq!(inflow_edge.label, "0.3 | 2022-07-17 14:10:09");
}

#[test]
fn test_scenario_duplicate_counterparty_collapses() {
    let graph = build_graph(
        "W",
        &[
            record("X", 1.5, "2022-07-13 00:35:37"),
            record("X", 2.5, "2022-07-14 09:00:00"),
        ],
        &[],
    );

    // One node for X, positioned from the first record only.
    let x_nodes: Vec<_> = graph.nodes.iter().filter(|n| n.id == "X").collect();
    assert_eq!(x_nodes.len(), 1);
    assert_eq!(x_nodes[0].position, Position::new(100.0, 200.0));
    assert_eq!(x_nodes[0].attributes.amount, 1.5);

    // One edge, label from the last record.
    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edge_between("X", "W").expect("X->W edge");
    assert_eq!(edge.label, "2.5 / 2022-07-14 09:00:00");
}

// ========================================================================
// Focal Node Tests
// ========================================================================

#[test]
fn test_focal_node_invariant() {
    let graph = build_graph("W", &[record("X", 1.0, "N/A")], &[record("W", 0.5, "N/A")]);

    let focal_nodes: Vec<_> = graph.nodes.iter().filter(|n| n.id == "W").collect();
    assert_eq!(focal_nodes.len(), 1);
    assert_eq!(focal_nodes[0].position, ANCHOR_POSITION);
}

#[test]
fn test_empty_record_lists_produce_focal_only_graph() {
    let graph = build_graph("W", &[], &[]);
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].id, "W");
    assert_eq!(graph.nodes[0].position, ANCHOR_POSITION);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_empty_focal_address_substitutes_sentinel() {
    let graph = build_graph("", &[record("X", 1.0, "N/A")], &[]);
    assert!(graph.node(DEFAULT_WALLET_ID).is_some());
    assert!(graph.edge_between("X", DEFAULT_WALLET_ID).is_some());
    assert_eq!(
        graph.node(DEFAULT_WALLET_ID).expect("sentinel node").label,
        "default_..."
    );
}

// ========================================================================
// Layout Tests
// ========================================================================

#[rstest]
#[case::first_slot(0, 100.0, 200.0)]
#[case::second_slot(1, 300.0, 200.0)]
#[case::fourth_slot(3, 700.0, 200.0)]
#[case::wraps_to_second_row(4, 100.0, 400.0)]
#[case::sixth_slot(5, 300.0, 400.0)]
#[case::third_row(8, 100.0, 600.0)]
fn test_left_band_wrapping_grid(#[case] index: usize, #[case] x: f64, #[case] y: f64) {
    let records: Vec<_> = (0..=index)
        .map(|i| record(&format!("addr{i}"), 1.0, "N/A"))
        .collect();
    let graph = build_graph("W", &records, &[]);

    let node = graph.node(&format!("addr{index}")).expect("band node");
    assert_eq!(node.position, Position::new(x, y));
}

#[test]
fn test_right_band_offset() {
    let graph = build_graph(
        "W",
        &[],
        &[record("A", 1.0, "N/A"), record("B", 2.0, "N/A")],
    );
    assert_eq!(
        graph.node("A").expect("A").position,
        Position::new(700.0, 200.0)
    );
    assert_eq!(
        graph.node("B").expect("B").position,
        Position::new(900.0, 200.0)
    );
}

#[test]
fn test_skipped_record_still_advances_layout_slot() {
    let graph = build_graph(
        "W",
        &[record_without_address(9.0), record("X", 1.0, "N/A")],
        &[],
    );

    // The malformed record is skipped but owns slot 0, so X lands in slot 1.
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(
        graph.node("X").expect("X").position,
        Position::new(300.0, 200.0)
    );
    assert_eq!(graph.edges.len(), 1);
}

// ========================================================================
// Uniqueness and Edge Tests
// ========================================================================

#[test]
fn test_node_ids_are_unique() {
    let graph = build_graph(
        "W",
        &[
            record("X", 1.0, "N/A"),
            record("Y", 2.0, "N/A"),
            record("X", 3.0, "N/A"),
        ],
        &[record("Y", 4.0, "N/A"), record("Z", 5.0, "N/A")],
    );

    let mut ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), graph.nodes.len());
}

#[test]
fn test_one_edge_per_unordered_pair() {
    // The same counterparty on both sides collapses to one edge: direction
    // from the first record, label from the last.
    let graph = build_graph(
        "W",
        &[record("X", 1.5, "2022-07-13 00:35:37")],
        &[record("X", 0.3, "2022-07-17 14:10:09")],
    );

    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edge_between("X", "W").expect("first-writer direction");
    assert_eq!(edge.label, "0.3 | 2022-07-17 14:10:09");
}

#[test]
fn test_edge_ids_follow_insertion_order() {
    let graph = build_graph(
        "W",
        &[record("X", 1.0, "N/A")],
        &[record("Y", 2.0, "N/A"), record("Z", 3.0, "N/A")],
    );

    let ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e0", "e1", "e2"]);
    assert!(graph.edges.iter().all(|e| e.animated));
}

#[test]
fn test_counterparty_label_prefers_entity_name() {
    let mut attributed = record("X", 1.0, "N/A");
    attributed.entity_name = "Changenow".to_string();

    let graph = build_graph("W", &[attributed, record("anonwallet123", 2.0, "N/A")], &[]);
    assert_eq!(graph.node("X").expect("X").label, "Changenow");
    assert_eq!(
        graph.node("anonwallet123").expect("anon").label,
        "anonwall..."
    );
}

// ========================================================================
// Memoizing Builder Tests
// ========================================================================

#[test]
fn test_builder_memoizes_unchanged_inputs() {
    let outflow = outflow_dataset(&[("X", 1.5)]);
    let inflow = inflow_dataset(&[("Y", 0.3)]);
    let mut builder = GraphBuilder::new();

    assert!(!builder.has_built());
    let first = builder.build("W", &outflow, &inflow);
    assert!(first.is_some());
    assert!(builder.has_built());

    // Same triple: memo hit, no rebuild.
    assert!(builder.build("W", &outflow, &inflow).is_none());
}

#[test]
fn test_builder_rebuilds_when_any_input_changes() {
    let outflow = outflow_dataset(&[("X", 1.5)]);
    let inflow = inflow_dataset(&[("Y", 0.3)]);
    let mut builder = GraphBuilder::new();
    builder.build("W", &outflow, &inflow);

    // Changed focal address.
    let rebuilt = builder.build("W2", &outflow, &inflow);
    assert!(rebuilt.is_some());
    assert!(rebuilt.expect("rebuild").node("W2").is_some());

    // Changed record contents.
    let changed_outflow = outflow_dataset(&[("X", 9.9)]);
    assert!(builder.build("W2", &changed_outflow, &inflow).is_some());

    // Unchanged again.
    assert!(builder.build("W2", &changed_outflow, &inflow).is_none());
}
