//! The interactive working copy and its reconciler.
//!
//! A [`GraphView`] holds the node/edge copy the rendering surface drags
//! around at high frequency, and keeps it convergent with the
//! authoritative [`GraphStore`] in both directions:
//!
//! - outbound, drag position changes are applied locally first (for
//!   responsive rendering) and then pushed wholesale into the store;
//! - inbound, the store is mirrored back only when an element actually
//!   differs, so a write followed by its own read-back never re-triggers
//!   an update.
//!
//! Drag frames and inbound passes interleave on one cooperative queue;
//! there is no locking, every pass is idempotent instead. The store wins
//! any conflict on membership, the local copy wins on live drag positions
//! until the outbound push flushes them.

use tokio::sync::watch;

use crate::domain::FlowDataset;
use crate::graph::{GraphBuilder, GraphEdge, GraphNode, Position};

use super::store::GraphStore;

// ============================================================================
// View Lifecycle
// ============================================================================

/// Lifecycle of a view instance.
///
/// `Uninitialized` until the builder succeeds once; `Built` the moment the
/// build seeds the store and the local copy identically; `Synced` once the
/// first inbound pass has run. There is no transition back to
/// `Uninitialized`: changed build inputs re-seed through `Built` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No build has completed yet; inbound syncs are refused.
    Uninitialized,
    /// The initial build has seeded both copies.
    Built,
    /// Steady state; inbound/outbound reconciliation rules apply.
    Synced,
}

/// A single node position delta reported by the interaction layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChange {
    /// Id of the dragged node.
    pub node_id: String,
    /// New position.
    pub position: Position,
}

// ============================================================================
// Graph View
// ============================================================================

/// Interactive copy of the graph plus the reconciliation logic keeping it
/// convergent with the store.
#[derive(Debug)]
pub struct GraphView {
    builder: GraphBuilder,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    phase: ViewPhase,
    revision_rx: watch::Receiver<u64>,
}

impl GraphView {
    /// Creates an uninitialized view subscribed to the store's revision
    /// channel.
    #[must_use]
    pub fn new(store: &GraphStore) -> Self {
        Self {
            builder: GraphBuilder::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            phase: ViewPhase::Uninitialized,
            revision_rx: store.subscribe(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Whether the initial build has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.phase != ViewPhase::Uninitialized
    }

    /// Local node collection, as the rendering surface should draw it.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Local edge collection.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    // ========================================================================
    // Initialization
    // ========================================================================

    /// Runs the memoized build and, on a fresh build, seeds the store and
    /// the local copy identically.
    ///
    /// A repeated call with an unchanged input triple is a no-op; changing
    /// the focal address or either dataset discards the local copy and
    /// re-seeds.
    ///
    /// # Returns
    ///
    /// `true` when a build ran, `false` on a memo hit.
    pub fn initialize(
        &mut self,
        store: &mut GraphStore,
        focal_address: &str,
        outflow: &FlowDataset,
        inflow: &FlowDataset,
    ) -> bool {
        let Some(snapshot) = self.builder.build(focal_address, outflow, inflow) else {
            return false;
        };

        self.nodes = snapshot.nodes.clone();
        self.edges = snapshot.edges.clone();
        store.replace_nodes(snapshot.nodes);
        store.replace_edges(snapshot.edges);
        self.phase = ViewPhase::Built;
        tracing::debug!(focal_address, "view seeded from fresh build");
        true
    }

    // ========================================================================
    // Outbound: Drag Position Updates
    // ========================================================================

    /// Applies drag position changes to the local copy immediately and
    /// pushes the resulting node list into the store.
    ///
    /// Changes for unknown node ids are ignored. No-op before the first
    /// build.
    pub fn apply_position_changes(&mut self, store: &mut GraphStore, changes: &[PositionChange]) {
        if self.phase == ViewPhase::Uninitialized {
            tracing::debug!("drag update ignored: view not initialized");
            return;
        }

        for change in changes {
            if let Some(node) = self.nodes.iter_mut().find(|n| n.id == change.node_id) {
                node.position = change.position;
            }
        }
        store.replace_nodes(self.nodes.clone());
    }

    // ========================================================================
    // Inbound: Mirror the Store
    // ========================================================================

    /// Whether the store has bumped its revision since the last inbound
    /// pass. A cheap hint only; [`sync_from_store`](Self::sync_from_store)
    /// always decides by value comparison.
    #[must_use]
    pub fn has_pending_update(&self) -> bool {
        self.revision_rx.has_changed().unwrap_or(false)
    }

    /// Mirrors the store into the local copy when at least one element
    /// differs.
    ///
    /// Nodes are compared by id and position, edges by id and endpoints.
    /// The pass is idempotent: re-applying an already-applied state is a
    /// no-op, which is what prevents a write-then-read-back cycle from
    /// re-triggering itself. Refused while uninitialized, otherwise the
    /// freshly built graph would be overwritten by an empty store.
    ///
    /// # Returns
    ///
    /// `true` when the local copy was updated.
    pub fn sync_from_store(&mut self, store: &GraphStore) -> bool {
        if self.phase == ViewPhase::Uninitialized {
            tracing::debug!("inbound sync skipped: view not initialized");
            return false;
        }

        // Consume the wakeup regardless of outcome.
        let _ = self.revision_rx.borrow_and_update();

        let nodes_differ = nodes_differ(&self.nodes, store.nodes());
        let edges_differ = edges_differ(&self.edges, store.edges());
        if !nodes_differ && !edges_differ {
            self.phase = ViewPhase::Synced;
            return false;
        }

        if nodes_differ {
            self.nodes = store.nodes().to_vec();
        }
        if edges_differ {
            self.edges = store.edges().to_vec();
        }
        self.phase = ViewPhase::Synced;
        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "local copy synced from store"
        );
        true
    }
}

// ============================================================================
// Value-Equality Guards
// ============================================================================

/// Node collections differ when lengths differ or some shared node has no
/// local counterpart with the same id and position.
fn nodes_differ(local: &[GraphNode], shared: &[GraphNode]) -> bool {
    local.len() != shared.len()
        || shared.iter().any(|sn| {
            !local
                .iter()
                .any(|ln| ln.id == sn.id && ln.position == sn.position)
        })
}

/// Edge collections differ when lengths differ or some shared edge has no
/// local counterpart with the same id and endpoints.
fn edges_differ(local: &[GraphEdge], shared: &[GraphEdge]) -> bool {
    local.len() != shared.len()
        || shared.iter().any(|se| {
            !local
                .iter()
                .any(|le| le.id == se.id && le.source == se.source && le.target == se.target)
        })
}
