//! Graph type definitions for wallet fund-flow visualization.
//!
//! This module provides the node and edge types produced by the graph
//! builder and consumed by the rendering collaborator: wallet nodes with
//! layout positions and hover attributes, labeled directed edges, and the
//! snapshot type bundling one consistent node/edge set.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DEFAULT_TOKEN_TYPE, DEFAULT_TRANSACTION_TYPE, TransactionRecord, UNKNOWN_DATE, UNKNOWN_ENTITY,
};

/// Sentinel focal id used when the caller supplies an empty address, so the
/// graph is never unaddressable.
pub const DEFAULT_WALLET_ID: &str = "default_wallet";

/// Number of leading address characters kept in a truncated display label.
const LABEL_PREFIX_LEN: usize = 8;

// ============================================================================
// Position
// ============================================================================

/// A node's layout position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Node Types
// ============================================================================

/// Kind of a graph node. Wallets are the only kind today; the enum is the
/// extension point for contract or service nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A wallet address.
    #[default]
    Wallet,
}

/// Hover/tooltip attributes carried by every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// Full untruncated wallet address.
    pub real_address: String,
    /// Known entity name, or "Unknown".
    pub entity: String,
    /// Aggregate amount from the record that created the node.
    pub amount: f64,
    /// Token type, e.g. "BTC".
    pub token_type: String,
    /// Transaction type, e.g. "Normal Tx".
    pub transaction_type: String,
    /// Record date, or "N/A".
    pub date: String,
}

impl NodeAttributes {
    /// Attributes for an address with no record data behind it (the focal
    /// node and manually added wallets).
    #[must_use]
    pub fn unknown(address: &str) -> Self {
        Self {
            real_address: address.to_string(),
            entity: UNKNOWN_ENTITY.to_string(),
            amount: 0.0,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            transaction_type: DEFAULT_TRANSACTION_TYPE.to_string(),
            date: UNKNOWN_DATE.to_string(),
        }
    }

    /// Attributes copied from a normalized counterparty record.
    #[must_use]
    pub fn from_record(address: &str, record: &TransactionRecord) -> Self {
        Self {
            real_address: address.to_string(),
            entity: record.entity_name.clone(),
            amount: record.amount,
            token_type: record.token_type.clone(),
            transaction_type: record.transaction_type.clone(),
            date: record.date.clone(),
        }
    }
}

/// A wallet node in the fund-flow graph.
///
/// Invariant: `id` (the wallet address) is unique within a node collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Wallet address; primary key within a node collection.
    pub id: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Display label: entity name when known, truncated address otherwise.
    pub label: String,
    /// Layout position.
    pub position: Position,
    /// Hover attributes.
    pub attributes: NodeAttributes,
}

impl GraphNode {
    /// Creates a wallet node.
    #[must_use]
    pub fn wallet(
        id: impl Into<String>,
        label: impl Into<String>,
        position: Position,
        attributes: NodeAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Wallet,
            label: label.into(),
            position,
            attributes,
        }
    }
}

/// Truncated display form of a wallet address: first 8 characters plus an
/// ellipsis marker.
#[must_use]
pub fn short_label(address: &str) -> String {
    let prefix: String = address.chars().take(LABEL_PREFIX_LEN).collect();
    format!("{prefix}...")
}

/// Display label for a counterparty: the entity name when attributed, the
/// truncated address otherwise.
#[must_use]
pub fn display_label(address: &str, record: &TransactionRecord) -> String {
    if record.has_known_entity() {
        record.entity_name.clone()
    } else {
        short_label(address)
    }
}

// ============================================================================
// Edge Types
// ============================================================================

/// A directed, labeled edge between two wallet nodes.
///
/// Invariant: the builder emits at most one edge per unordered endpoint
/// pair; `id` is unique within an edge collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Edge id, `e{n}` with a monotonic suffix.
    pub id: String,
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Display label (amount and timestamp, or the manual-link placeholder).
    pub label: String,
    /// Whether the rendering collaborator should animate the edge.
    pub animated: bool,
}

// ============================================================================
// Snapshot
// ============================================================================

/// One consistent node/edge set as produced by a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in creation order, focal node first.
    pub nodes: Vec<GraphNode>,
    /// Edges in first-insertion order.
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks up an edge by its ordered endpoint pair.
    #[must_use]
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&GraphEdge> {
        self.edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::long_address("bc1qq7ldp3mza8q7q9e9gmzg72rzafyegckg57wluu", "bc1qq7ld...")]
    #[case::exactly_eight("12345678", "12345678...")]
    #[case::shorter_than_eight("abc", "abc...")]
    fn test_short_label(#[case] address: &str, #[case] expected: &str) {
        assert_eq!(short_label(address), expected);
    }

    #[test]
    fn test_display_label_prefers_known_entity() {
        let mut record =
            TransactionRecord::from_raw(&crate::domain::RawRecord::default(), crate::domain::FlowDirection::Inflow);
        assert_eq!(display_label("bc1qabcdef123", &record), "bc1qabcd...");

        record.entity_name = "Changenow".to_string();
        assert_eq!(display_label("bc1qabcdef123", &record), "Changenow");
    }

    #[test]
    fn test_node_kind_serializes_lowercase() {
        let node = GraphNode::wallet(
            "addr",
            "addr...",
            Position::new(0.0, 0.0),
            NodeAttributes::unknown("addr"),
        );
        let json = serde_json::to_value(&node).expect("node should serialize");
        assert_eq!(json["kind"], "wallet");
    }
}
