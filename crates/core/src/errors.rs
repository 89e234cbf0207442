use thiserror::Error;

/// Unified error type for the entire trading-calculator-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Encoding ──────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Corrupt data under '{key}': {reason}")]
    CorruptData { key: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Trade validation failed: {0}")]
    ValidationError(String),

    #[error("Saved trade not found: {0}")]
    TradeNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
