//! Fund-flow graph derivation.
//!
//! This module turns normalized counterparty records into the node/edge
//! sets the rendering collaborator draws.
//!
//! # Module Organization
//!
//! - [`types`] - Node, edge, position, and snapshot types
//! - [`builder`] - Pure graph construction plus the memoizing builder

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{ANCHOR_POSITION, GraphBuilder, build_graph};
pub use types::{
    DEFAULT_WALLET_ID, GraphEdge, GraphNode, GraphSnapshot, NodeAttributes, NodeKind, Position,
    display_label, short_label,
};

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests;
