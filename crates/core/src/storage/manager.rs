use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::session::TradeSession;
use crate::models::settings::Settings;
use crate::models::trade::SavedTrade;

use super::format;
use super::kv::KeyValueStore;

/// Persists named trade snapshots and the active-session mirror.
///
/// The two live under separate keys and never share entry lists: every
/// save and load copies. Corrupt or missing data reads as "nothing saved".
#[derive(Debug)]
pub struct SnapshotStore<S: KeyValueStore> {
    store: S,
    settings: Settings,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // ── Named snapshots ─────────────────────────────────────────────

    /// All saved trades, most recently saved first.
    /// Absent, unreadable or corrupt data yields an empty list.
    #[must_use]
    pub fn list_saved(&self) -> Vec<SavedTrade> {
        let key = &self.settings.trades_key;
        let Some(text) = self.read_key(key) else {
            return Vec::new();
        };
        match format::decode_trade_list(key, &text) {
            Ok(trades) => trades,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable saved trade list");
                Vec::new()
            }
        }
    }

    /// Look up one saved trade by id.
    #[must_use]
    pub fn get_saved(&self, id: &str) -> Option<SavedTrade> {
        self.list_saved().into_iter().find(|t| t.id == id)
    }

    /// Save a copy of `session` under `name`, stamped with the current time.
    pub fn save(&mut self, session: &TradeSession, name: &str) -> Result<SavedTrade, CoreError> {
        self.save_at(session, name, chrono::Utc::now().timestamp_millis())
    }

    /// Save a copy of `session` under `name` with an explicit timestamp (ms since epoch).
    ///
    /// The name is trimmed; an empty name is rejected before any storage access.
    /// The new trade is prepended to the list. Its id is the timestamp as a
    /// string, bumped past any existing numeric id so ids stay unique and ordered.
    pub fn save_at(
        &mut self,
        session: &TradeSession,
        name: &str,
        now_ms: i64,
    ) -> Result<SavedTrade, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Trade name must not be empty".into(),
            ));
        }

        let mut trades = self.list_saved();
        let id = Self::next_trade_id(&trades, now_ms);
        let trade = SavedTrade::from_session(session, id, name, now_ms);

        trades.insert(0, trade.clone());
        self.write_list(&trades)?;
        debug!(id = %trade.id, name = %trade.name, count = trades.len(), "saved trade");
        Ok(trade)
    }

    /// Delete a saved trade by id and persist the remaining list.
    /// Returns whether a trade was actually removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, CoreError> {
        let mut trades = self.list_saved();
        let before = trades.len();
        trades.retain(|t| t.id != id);
        let removed = trades.len() != before;

        self.write_list(&trades)?;
        debug!(id, removed, "deleted saved trade");
        Ok(removed)
    }

    fn write_list(&mut self, trades: &[SavedTrade]) -> Result<(), CoreError> {
        let text = format::encode_trade_list(trades)?;
        self.store.set(&self.settings.trades_key, &text)
    }

    fn next_trade_id(trades: &[SavedTrade], now_ms: i64) -> String {
        let newest = trades
            .iter()
            .filter_map(|t| t.id.parse::<i64>().ok())
            .max();
        let id = match newest {
            Some(newest) if newest >= now_ms => newest.checked_add(1).unwrap_or(now_ms),
            _ => now_ms,
        };
        id.to_string()
    }

    // ── Active slot ─────────────────────────────────────────────────

    /// The auto-saved working copy, if present and valid.
    #[must_use]
    pub fn read_active(&self) -> Option<SavedTrade> {
        let key = &self.settings.active_key;
        let text = self.read_key(key)?;
        match format::decode_trade(key, &text) {
            Ok(trade) => Some(trade),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable active trade");
                None
            }
        }
    }

    /// Mirror `session` into the active slot, stamped with the current time.
    pub fn write_active(&mut self, session: &TradeSession) -> Result<(), CoreError> {
        self.write_active_at(session, chrono::Utc::now().timestamp_millis())
    }

    pub fn write_active_at(&mut self, session: &TradeSession, now_ms: i64) -> Result<(), CoreError> {
        let text = format::encode_trade(&SavedTrade::active(session, now_ms))?;
        self.store.set(&self.settings.active_key, &text)
    }

    /// Forget the active slot.
    pub fn clear_active(&mut self) -> Result<(), CoreError> {
        self.store.remove(&self.settings.active_key)
    }

    /// Remove both keys: all saved trades and the active slot.
    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        self.store.remove(&self.settings.trades_key)?;
        self.store.remove(&self.settings.active_key)
    }

    /// Backend failures on read are treated like an absent key.
    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }
}
