//! Text encoding of persisted trades.
//!
//! Layout (JSON, camelCase):
//! ```text
//! { "id": "1718000000000", "name": "AAPL Long",
//!   "entries": [ { "id": 1, "price": 100.0, "investment": 1000.0 } ],
//!   "stopLoss": 95.0, "nextId": 2, "timestamp": 1718000000000 }
//! ```
//! The trade list is a JSON array of such records, most recent first.

use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::session::MAX_SAFE_ID;
use crate::models::trade::SavedTrade;

/// Serialize one trade record.
pub fn encode_trade(trade: &SavedTrade) -> Result<String, CoreError> {
    serde_json::to_string(trade)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize trade: {e}")))
}

/// Serialize the saved-trade list.
pub fn encode_trade_list(trades: &[SavedTrade]) -> Result<String, CoreError> {
    serde_json::to_string(trades)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize trade list: {e}")))
}

/// Parse and validate one trade record (the active slot).
/// The active record must hold at least one entry.
pub fn decode_trade(key: &str, text: &str) -> Result<SavedTrade, CoreError> {
    let trade: SavedTrade = serde_json::from_str(text).map_err(|e| corrupt(key, e.to_string()))?;
    validate_trade(&trade).map_err(|reason| corrupt(key, reason))?;
    if trade.entries.is_empty() {
        return Err(corrupt(key, "active trade has no entries".into()));
    }
    Ok(trade)
}

/// Parse and validate the saved-trade list.
/// A single malformed record rejects the whole list.
pub fn decode_trade_list(key: &str, text: &str) -> Result<Vec<SavedTrade>, CoreError> {
    let trades: Vec<SavedTrade> =
        serde_json::from_str(text).map_err(|e| corrupt(key, e.to_string()))?;

    let mut seen = HashSet::with_capacity(trades.len());
    for trade in &trades {
        validate_trade(trade)
            .map_err(|reason| corrupt(key, format!("trade '{}': {reason}", trade.id)))?;
        if !seen.insert(trade.id.as_str()) {
            return Err(corrupt(key, format!("duplicate trade id '{}'", trade.id)));
        }
    }
    Ok(trades)
}

/// Shape checks serde can't express: amounts must be finite and
/// non-negative, entry ids unique, trade id non-empty, and every integer id
/// (including a numeric trade id) at most [`MAX_SAFE_ID`].
fn validate_trade(trade: &SavedTrade) -> Result<(), String> {
    if trade.id.is_empty() {
        return Err("empty trade id".into());
    }
    if let Ok(numeric) = trade.id.parse::<i128>() {
        if numeric > i128::from(MAX_SAFE_ID) {
            return Err(format!("trade id {numeric} out of range"));
        }
    }
    if trade.next_id > MAX_SAFE_ID {
        return Err(format!("next id {} out of range", trade.next_id));
    }
    if !is_amount(trade.stop_loss) {
        return Err(format!("invalid stop loss {}", trade.stop_loss));
    }

    let mut ids = HashSet::with_capacity(trade.entries.len());
    for entry in &trade.entries {
        if !is_amount(entry.price) {
            return Err(format!("entry {} has invalid price {}", entry.id, entry.price));
        }
        if !is_amount(entry.investment) {
            return Err(format!(
                "entry {} has invalid investment {}",
                entry.id, entry.investment
            ));
        }
        if entry.id > MAX_SAFE_ID {
            return Err(format!("entry id {} out of range", entry.id));
        }
        if !ids.insert(entry.id) {
            return Err(format!("duplicate entry id {}", entry.id));
        }
    }
    Ok(())
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn corrupt(key: &str, reason: String) -> CoreError {
    CoreError::CorruptData {
        key: key.to_string(),
        reason,
    }
}
