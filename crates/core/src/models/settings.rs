use serde::{Deserialize, Serialize};

/// Default key for the named-snapshot list.
pub const DEFAULT_TRADES_KEY: &str = "trading-calculator-trades";

/// Default key for the auto-saved active session.
pub const DEFAULT_ACTIVE_KEY: &str = "trading-calculator-active";

/// Storage configuration for a calculator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Key holding the serialized list of saved trades.
    pub trades_key: String,

    /// Key holding the serialized active session.
    pub active_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trades_key: DEFAULT_TRADES_KEY.to_string(),
            active_key: DEFAULT_ACTIVE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Settings with both keys prefixed, for hosting several calculators on one store.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            trades_key: format!("{prefix}{DEFAULT_TRADES_KEY}"),
            active_key: format!("{prefix}{DEFAULT_ACTIVE_KEY}"),
        }
    }
}
