//! Authoritative graph state and its mutation operations.
//!
//! [`GraphStore`] is the single owner of the current node/edge collections
//! and the theme flag. Every consumer mutates it through the named
//! operations here; direct field assignment is not part of the contract.
//! Each applied mutation bumps a watch-channel revision so interactive
//! views know when to run an inbound sync pass.

use tokio::sync::watch;

use crate::graph::{GraphEdge, GraphNode};

// ============================================================================
// Graph State
// ============================================================================

/// The authoritative graph state: nodes, edges, and the theme flag.
///
/// Created empty at process start, replaced wholesale by the builder's
/// initial output, incrementally mutated by user actions, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    /// Current node collection, ids unique.
    pub nodes: Vec<GraphNode>,
    /// Current edge collection.
    pub edges: Vec<GraphEdge>,
    /// Theme flag read by presentational collaborators.
    pub dark_mode: bool,
}

// ============================================================================
// Graph Store
// ============================================================================

/// Owner of the [`GraphState`] plus the revision channel used for change
/// notification.
///
/// All mutations are synchronous and atomic with respect to each other;
/// duplicate inserts are idempotent no-ops rather than errors.
#[derive(Debug)]
pub struct GraphStore {
    state: GraphState,
    // NOTE: watch-channel sends are fire-and-forget; send_modify cannot fail
    // and subscribers may come and go freely.
    revision_tx: watch::Sender<u64>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Creates an empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        let (revision_tx, _revision_rx) = watch::channel(0);
        Self {
            state: GraphState::default(),
            revision_tx,
        }
    }

    /// Subscribes to revision bumps. Receivers observe a change whenever a
    /// mutation was actually applied.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    /// Current revision number.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision_tx.borrow()
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// Current node collection.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.state.nodes
    }

    /// Current edge collection.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.state.edges
    }

    /// Current theme flag.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    /// Whether a node with the given id exists.
    #[must_use]
    pub fn has_node(&self, id: &str) -> bool {
        self.state.nodes.iter().any(|node| node.id == id)
    }

    // ========================================================================
    // Mutation Operations
    // ========================================================================

    /// Wholesale node replacement, used by the initial builder seed and by
    /// full resyncs. Bumps the revision only when the collection changed.
    pub fn replace_nodes(&mut self, nodes: Vec<GraphNode>) {
        if self.state.nodes != nodes {
            self.state.nodes = nodes;
            self.bump();
        }
    }

    /// Wholesale edge replacement. Bumps the revision only when the
    /// collection changed.
    pub fn replace_edges(&mut self, edges: Vec<GraphEdge>) {
        if self.state.edges != edges {
            self.state.edges = edges;
            self.bump();
        }
    }

    /// Inserts a node iff no existing node shares its id.
    ///
    /// # Returns
    ///
    /// `true` when the node was inserted; `false` on the idempotent
    /// duplicate no-op.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.has_node(&node.id) {
            tracing::debug!(id = %node.id, "add_node ignored: id already present");
            return false;
        }
        self.state.nodes.push(node);
        self.bump();
        true
    }

    /// Inserts an edge iff the exact ordered `(source, target)` pair is
    /// absent and both endpoints exist as nodes. The new edge gets id
    /// `e{edge_count + 1}` and is animated.
    ///
    /// # Returns
    ///
    /// `true` when the edge was inserted; `false` on the silent no-op.
    pub fn add_edge(&mut self, source: &str, target: &str, label: impl Into<String>) -> bool {
        let duplicate = self
            .state
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target);
        if duplicate || !self.has_node(source) || !self.has_node(target) {
            tracing::debug!(source, target, "add_edge ignored");
            return false;
        }

        self.state.edges.push(GraphEdge {
            id: format!("e{}", self.state.edges.len() + 1),
            source: source.to_string(),
            target: target.to_string(),
            label: label.into(),
            animated: true,
        });
        self.bump();
        true
    }

    /// Flips the theme flag; no other state is touched.
    pub fn toggle_dark_mode(&mut self) {
        self.state.dark_mode = !self.state.dark_mode;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision_tx.send_modify(|revision| *revision += 1);
    }
}
