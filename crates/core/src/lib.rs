pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    entry::{Entry, EntryField},
    session::TradeSession,
    settings::Settings,
    summary::TradeSummary,
    trade::SavedTrade,
};
use services::{calculation_service, session_service::SessionService};
use storage::{kv::KeyValueStore, manager::SnapshotStore};
use tracing::warn;

use errors::CoreError;

/// Main entry point for the Trading Calculator core library.
///
/// Owns the live trade session and the snapshot store behind it. Every
/// successful mutation is written through to the active slot, so the last
/// state survives a reload.
#[must_use]
pub struct TradingCalculator<S: KeyValueStore> {
    session: TradeSession,
    session_service: SessionService,
    snapshots: SnapshotStore<S>,
    /// Whether the initial session came from the active slot.
    restored: bool,
}

impl<S: KeyValueStore> std::fmt::Debug for TradingCalculator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingCalculator")
            .field("entries", &self.session.entries.len())
            .field("stop_loss", &self.session.stop_loss)
            .field("next_id", &self.session.next_id)
            .field("settings", self.snapshots.settings())
            .field("restored", &self.restored)
            .finish()
    }
}

impl<S: KeyValueStore> TradingCalculator<S> {
    /// Open a calculator on `store` with the default storage keys.
    ///
    /// Restores the last active session if one is stored and valid,
    /// otherwise starts from the default single-entry session. Nothing is
    /// written until the first mutation.
    pub fn open(store: S) -> Self {
        Self::open_with_settings(store, Settings::default())
    }

    /// Open a calculator with custom storage keys.
    pub fn open_with_settings(store: S, settings: Settings) -> Self {
        let snapshots = SnapshotStore::with_settings(store, settings);
        let session_service = SessionService::new();
        let mut session = TradeSession::default();

        let restored = match snapshots.read_active() {
            Some(active) => {
                session_service.load_from(&mut session, &active);
                true
            }
            None => false,
        };

        Self {
            session,
            session_service,
            snapshots,
            restored,
        }
    }

    /// Whether the current session was restored from the active slot on open.
    #[must_use]
    pub fn restored_from_storage(&self) -> bool {
        self.restored
    }

    // ── Session State ───────────────────────────────────────────────

    #[must_use]
    pub fn session(&self) -> &TradeSession {
        &self.session
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.session.entries
    }

    #[must_use]
    pub fn stop_loss(&self) -> f64 {
        self.session.stop_loss
    }

    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.session.next_id
    }

    // ── Entry Management ────────────────────────────────────────────

    /// Append a blank entry and return its id.
    pub fn add_entry(&mut self) -> u64 {
        let id = self.session_service.add_entry(&mut self.session);
        self.persist_active();
        id
    }

    /// Remove an entry. No-op (returns `false`) for the last remaining entry
    /// or an unknown id.
    pub fn remove_entry(&mut self, id: u64) -> bool {
        let removed = self.session_service.remove_entry(&mut self.session, id);
        if removed {
            self.persist_active();
        }
        removed
    }

    /// Set an entry's price or investment. Negative or non-finite values become 0.
    pub fn update_entry(&mut self, id: u64, field: EntryField, value: f64) -> bool {
        let updated = self
            .session_service
            .update_entry(&mut self.session, id, field, value);
        if updated {
            self.persist_active();
        }
        updated
    }

    /// Like [`Self::update_entry`], parsing raw form input. Unparseable input becomes 0.
    pub fn update_entry_input(&mut self, id: u64, field: EntryField, input: &str) -> bool {
        let value = services::session_service::parse_amount(input);
        self.update_entry(id, field, value)
    }

    pub fn set_stop_loss(&mut self, value: f64) {
        self.session_service.set_stop_loss(&mut self.session, value);
        self.persist_active();
    }

    pub fn set_stop_loss_input(&mut self, input: &str) {
        self.set_stop_loss(services::session_service::parse_amount(input));
    }

    /// Reset to the default single-entry session.
    /// Destructive: confirmation is the caller's job.
    pub fn clear(&mut self) {
        self.session_service.clear(&mut self.session);
        self.persist_active();
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// All four risk metrics for the current session.
    #[must_use]
    pub fn summary(&self) -> TradeSummary {
        calculation_service::summarize(&self.session.entries, self.session.stop_loss)
    }

    #[must_use]
    pub fn total_loss(&self) -> f64 {
        calculation_service::total_loss(&self.session.entries, self.session.stop_loss)
    }

    #[must_use]
    pub fn total_investment(&self) -> f64 {
        calculation_service::total_investment(&self.session.entries)
    }

    #[must_use]
    pub fn total_shares(&self) -> f64 {
        calculation_service::total_shares(&self.session.entries)
    }

    #[must_use]
    pub fn average_entry_price(&self) -> f64 {
        calculation_service::average_entry_price(&self.session.entries)
    }

    // ── Saved Trades ────────────────────────────────────────────────

    /// Save the current session under `name` (trimmed).
    /// Fails with `ValidationError` for a blank name, without touching storage.
    pub fn save_trade(&mut self, name: &str) -> Result<SavedTrade, CoreError> {
        self.snapshots.save(&self.session, name)
    }

    /// Saved trades, most recent first.
    #[must_use]
    pub fn saved_trades(&self) -> Vec<SavedTrade> {
        self.snapshots.list_saved()
    }

    /// Replace the session with a copy of `trade`.
    pub fn load_trade(&mut self, trade: &SavedTrade) {
        self.session_service.load_from(&mut self.session, trade);
        self.persist_active();
    }

    /// Replace the session with the saved trade stored under `id`.
    pub fn load_saved_trade(&mut self, id: &str) -> Result<(), CoreError> {
        let trade = self
            .snapshots
            .get_saved(id)
            .ok_or_else(|| CoreError::TradeNotFound(id.to_string()))?;
        self.load_trade(&trade);
        Ok(())
    }

    /// Delete a saved trade. Confirmation is the caller's job.
    pub fn delete_trade(&mut self, id: &str) -> Result<bool, CoreError> {
        self.snapshots.delete(id)
    }

    #[must_use]
    pub fn snapshots(&self) -> &SnapshotStore<S> {
        &self.snapshots
    }

    /// Give back the underlying key-value store.
    pub fn into_store(self) -> S {
        self.snapshots.into_inner()
    }

    /// Auto-save is fire-and-forget: failures are logged, never surfaced.
    fn persist_active(&mut self) {
        if let Err(e) = self.snapshots.write_active(&self.session) {
            warn!(error = %e, "failed to auto-save active trade");
        }
    }
}
