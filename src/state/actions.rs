//! User action handlers.
//!
//! These translate raw interaction events from the presentational
//! collaborators (the side panel's add-wallet form, the canvas's
//! connection gesture, the theme button) into calls against the store's
//! mutation contract. Invalid actions originate from transient user
//! gestures, so they are rejected silently rather than raised.

use rand::Rng;

use crate::graph::{GraphNode, NodeAttributes, Position, short_label};

use super::store::GraphStore;

/// Fixed label for manually drawn connections.
pub const MANUAL_EDGE_LABEL: &str = "Manual / N/A";

/// Side length of the square the add-wallet handler scatters new nodes in.
const RANDOM_PLACEMENT_SPAN: f64 = 500.0;

// ============================================================================
// Handlers
// ============================================================================

/// Adds a manually entered wallet as a new node at a random position.
///
/// Empty addresses and addresses already present as node ids are silent
/// no-ops.
///
/// # Returns
///
/// `true` when a node was added.
pub fn add_wallet(store: &mut GraphStore, address: &str) -> bool {
    if address.is_empty() {
        tracing::debug!("add_wallet ignored: empty address");
        return false;
    }
    if store.has_node(address) {
        tracing::debug!(address, "add_wallet ignored: node already present");
        return false;
    }

    let mut rng = rand::thread_rng();
    let position = Position::new(
        rng.gen_range(0.0..RANDOM_PLACEMENT_SPAN),
        rng.gen_range(0.0..RANDOM_PLACEMENT_SPAN),
    );
    store.add_node(GraphNode::wallet(
        address,
        short_label(address),
        position,
        NodeAttributes::unknown(address),
    ))
}

/// Adds a manually drawn connection between two existing nodes, labeled
/// with [`MANUAL_EDGE_LABEL`].
///
/// Delegates the preconditions (both endpoints exist, ordered pair not
/// already connected) to the store; failures are silent no-ops since the
/// gesture may resolve before both ends exist.
///
/// # Returns
///
/// `true` when an edge was added.
pub fn connect_wallets(store: &mut GraphStore, source: &str, target: &str) -> bool {
    store.add_edge(source, target, MANUAL_EDGE_LABEL)
}

/// Toggles the light/dark theme flag. Purely presentational.
pub fn toggle_theme(store: &mut GraphStore) {
    store.toggle_dark_mode();
}
