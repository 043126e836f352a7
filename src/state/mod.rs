//! State management for the walletflow graph engine.
//!
//! This module separates the spec's state concerns:
//!
//! - [`GraphStore`] - the single authoritative owner of the node/edge
//!   collections and theme flag, mutated only through its named operations
//! - [`GraphView`] - the disposable interactive copy plus the reconciler
//!   that keeps both convergent without feedback loops
//! - [`actions`] - handlers translating user gestures into store mutations
//!
//! # Architecture
//!
//! ```text
//! records ──► GraphBuilder ──► GraphView::initialize ──► GraphStore
//!                                   ▲      │ outbound (drag)   │
//!                                   │      └────────────────►  │
//!                                   └── inbound sync ◄── watch revision
//! ```
//!
//! Everything here is single-threaded and event-driven; the watch channel
//! is a wakeup hint, and value-equality guards make every reconciliation
//! pass idempotent.

// ============================================================================
// Module Declarations
// ============================================================================

pub mod actions;
pub mod store;
pub mod view;

// ============================================================================
// Re-exports
// ============================================================================

// Store types
pub use store::{GraphState, GraphStore};

// View types
pub use view::{GraphView, PositionChange, ViewPhase};

// Action handlers
pub use actions::{MANUAL_EDGE_LABEL, add_wallet, connect_wallets, toggle_theme};

// ============================================================================
// Tests
// ============================================================================
