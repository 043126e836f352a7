//! Error types for fund-flow dataset handling.
//!
//! The graph core itself never fails: malformed records are skipped and
//! duplicate mutations are no-ops. The only fallible surface is turning a
//! raw JSON payload into a [`FlowDataset`](super::FlowDataset), which this
//! module wraps in a structured error.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors produced while ingesting fund-flow input data.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The dataset JSON could not be deserialized into the expected
    /// `{ message, data }` shape.
    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Tests
// ============================================================================
