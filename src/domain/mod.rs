//! Domain types for the walletflow graph engine.
//!
//! This module contains the input side of the engine: raw counterparty
//! records as upstream services report them, the normalizer that maps their
//! heterogeneous field names onto one canonical shape, and the error type
//! for dataset ingestion.
//!
//! # Module Organization
//!
//! - [`error`] - Error types for dataset handling
//! - [`record`] - Raw records, datasets, and the record normalizer

// ============================================================================
// Module Declarations
// ============================================================================

pub mod error;
pub mod record;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::FlowError;

// Record types
pub use record::{
    DEFAULT_TOKEN_TYPE, DEFAULT_TRANSACTION_TYPE, FlowDataset, FlowDirection, RawRecord,
    RawSubTransaction, SubTransaction, TIMESTAMP_FORMAT, TransactionRecord, UNKNOWN_DATE,
    UNKNOWN_ENTITY, normalize_timestamp,
};
