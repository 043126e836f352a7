//! Fund-flow transaction records and the record normalizer.
//!
//! Upstream tracing services report the two sides of a wallet's activity as
//! separate JSON payloads whose field names vary by direction
//! (`beneficiary_address` vs `payer_address`) and by spelling
//! (`token_type` vs `tokenType`). This module deserializes those payloads
//! into [`RawRecord`]s and normalizes them into the canonical
//! [`TransactionRecord`] shape the graph builder consumes.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::FlowError;

/// Canonical timestamp format used across record dates and edge labels.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for missing dates.
pub const UNKNOWN_DATE: &str = "N/A";

/// Placeholder for missing entity names.
pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Default token type when a record does not declare one.
pub const DEFAULT_TOKEN_TYPE: &str = "BTC";

/// Default transaction type when a record does not declare one.
pub const DEFAULT_TRANSACTION_TYPE: &str = "Normal Tx";

// ============================================================================
// Flow Direction
// ============================================================================

/// Direction of a fund flow relative to the focal wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// Funds received by the focal wallet from a counterparty.
    Inflow,
    /// Funds sent by the focal wallet to a counterparty.
    Outflow,
}

impl FlowDirection {
    /// Human-readable direction label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
        }
    }
}

// ============================================================================
// Raw Input Types
// ============================================================================

/// A per-transaction entry nested inside a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubTransaction {
    /// Amount moved by this individual transaction.
    #[serde(default)]
    pub tx_amount: f64,
    /// Timestamp of this individual transaction.
    #[serde(default)]
    pub date_time: String,
    /// On-chain transaction id.
    #[serde(default)]
    pub transaction_id: String,
}

/// One counterparty entry exactly as the upstream service reports it.
///
/// Every field is optional: upstream payloads are best-effort and the
/// normalizer supplies defaults rather than rejecting partial data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Counterparty address as spelled in outflow-direction payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_address: Option<String>,
    /// Counterparty address as spelled in inflow-direction payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_address: Option<String>,
    /// Aggregate amount across the record's transactions.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Record-level date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Alternate date spelling used by some payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Known entity name for the counterparty, if attributed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Token type, e.g. "BTC".
    #[serde(default, alias = "tokenType", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Transaction type, e.g. "Normal Tx".
    #[serde(
        default,
        alias = "transactionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<String>,
    /// Individual transactions aggregated by this record.
    #[serde(default)]
    pub transactions: Vec<RawSubTransaction>,
}

impl RawRecord {
    /// Counterparty address for the given direction.
    ///
    /// Outflow payloads spell the other party `beneficiary_address`, inflow
    /// payloads spell it `payer_address`; each falls back to the other
    /// spelling so a mislabeled payload still resolves.
    #[must_use]
    pub fn counterparty(&self, direction: FlowDirection) -> Option<&str> {
        let (primary, fallback) = match direction {
            FlowDirection::Outflow => (&self.beneficiary_address, &self.payer_address),
            FlowDirection::Inflow => (&self.payer_address, &self.beneficiary_address),
        };
        primary.as_deref().or(fallback.as_deref())
    }
}

// ============================================================================
// Flow Dataset
// ============================================================================

/// A full direction-specific payload: `{ "message": ..., "data": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDataset {
    /// Upstream status message, e.g. "success". Informational only.
    #[serde(default)]
    pub message: String,
    /// The counterparty records.
    #[serde(default)]
    pub data: Vec<RawRecord>,
}

impl FlowDataset {
    /// Deserializes a dataset from its raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Parse`] when the payload is not valid JSON of
    /// the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read-only counterparty address listing for the side-panel collaborator.
    ///
    /// Uses the same field mapping as the graph builder so the panel and the
    /// graph always agree on who the counterparty is. Records without an
    /// address are skipped.
    #[must_use]
    pub fn counterparty_addresses(&self, direction: FlowDirection) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|record| record.counterparty(direction))
            .map(str::to_string)
            .collect()
    }

    /// Normalizes every record in the dataset for the given direction.
    #[must_use]
    pub fn normalize(&self, direction: FlowDirection) -> Vec<TransactionRecord> {
        self.data
            .iter()
            .map(|raw| TransactionRecord::from_raw(raw, direction))
            .collect()
    }
}

// ============================================================================
// Normalized Record Types
// ============================================================================

/// A single transaction nested under a normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTransaction {
    /// Amount moved by this transaction.
    pub amount: f64,
    /// Timestamp of this transaction.
    pub timestamp: String,
    /// On-chain transaction id.
    pub tx_id: String,
}

/// A counterparty record with canonical field names and defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The non-focal party in the record. `None` when the upstream payload
    /// omitted the address; callers must filter such records out.
    pub counterparty_address: Option<String>,
    /// Aggregate amount across the record's transactions.
    pub amount: f64,
    /// Record date in canonical form, or [`UNKNOWN_DATE`].
    pub date: String,
    /// Entity name, or [`UNKNOWN_ENTITY`].
    pub entity_name: String,
    /// Token type, or [`DEFAULT_TOKEN_TYPE`].
    pub token_type: String,
    /// Transaction type, or [`DEFAULT_TRANSACTION_TYPE`].
    pub transaction_type: String,
    /// Individual transactions aggregated by this record, in payload order.
    pub sub_transactions: Vec<SubTransaction>,
}

impl TransactionRecord {
    /// Normalizes a raw record for the given direction.
    ///
    /// Always produces a best-effort record; missing optional fields get
    /// their documented defaults and the input is left untouched.
    #[must_use]
    pub fn from_raw(raw: &RawRecord, direction: FlowDirection) -> Self {
        let date = raw
            .date
            .as_deref()
            .or(raw.date_time.as_deref())
            .map(normalize_timestamp)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        Self {
            counterparty_address: raw.counterparty(direction).map(str::to_string),
            amount: raw.amount.unwrap_or(0.0),
            date,
            entity_name: raw
                .entity_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_ENTITY.to_string()),
            token_type: raw
                .token_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            transaction_type: raw
                .transaction_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TRANSACTION_TYPE.to_string()),
            sub_transactions: raw
                .transactions
                .iter()
                .map(|tx| SubTransaction {
                    amount: tx.tx_amount,
                    timestamp: normalize_timestamp(&tx.date_time),
                    tx_id: tx.transaction_id.clone(),
                })
                .collect(),
        }
    }

    /// Whether the record carries a known entity attribution.
    #[must_use]
    pub fn has_known_entity(&self) -> bool {
        !self.entity_name.is_empty() && self.entity_name != UNKNOWN_ENTITY
    }
}

// ============================================================================
// Timestamp Normalization
// ============================================================================

/// Canonicalizes a record timestamp.
///
/// Accepts the canonical `%Y-%m-%d %H:%M:%S` form and RFC 3339; anything
/// else is passed through unchanged so partial data stays displayable.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    if NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).is_ok() {
        return raw.to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.naive_utc().format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}

// ============================================================================
// Tests
// ============================================================================
