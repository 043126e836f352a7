//! walletflow - wallet fund-flow graph derivation and synchronization.
//!
//! This crate is the core engine behind a wallet fund-flow visualization:
//! it turns raw per-address transaction payloads into a deduplicated set of
//! graph nodes and labeled edges around a focal wallet, owns the
//! authoritative graph state, and keeps an interactive working copy
//! convergent with it while the user drags nodes, draws connections, and
//! adds wallets.
//!
//! Rendering, styling, tooltips, and export are external collaborators:
//! they consume the node/edge collections exposed here and feed user
//! gestures back through the [`state::actions`] handlers.
//!
//! # Data Flow
//!
//! ```text
//! raw JSON ──► domain::FlowDataset ──► graph::GraphBuilder
//!                                            │
//!                                            ▼
//!            state::GraphView ◄────────► state::GraphStore
//!            (interactive copy)          (authoritative)
//! ```
//!
//! # Example
//!
//! ```
//! use walletflow::domain::FlowDataset;
//! use walletflow::state::{GraphStore, GraphView, add_wallet};
//!
//! let outflow = FlowDataset::from_json(
//!     r#"{"message":"success","data":[{"beneficiary_address":"bc1qx","amount":1.5,"date":"2022-07-13 00:35:37"}]}"#,
//! )?;
//! let inflow = FlowDataset::from_json(r#"{"message":"success","data":[]}"#)?;
//!
//! let mut store = GraphStore::new();
//! let mut view = GraphView::new(&store);
//! view.initialize(&mut store, "bc1qfocal", &outflow, &inflow);
//!
//! assert_eq!(store.nodes().len(), 2);
//! add_wallet(&mut store, "bc1qmanual");
//! view.sync_from_store(&store);
//! assert_eq!(view.nodes().len(), 3);
//! # Ok::<(), walletflow::domain::FlowError>(())
//! ```

pub mod domain;
pub mod graph;
pub mod state;
