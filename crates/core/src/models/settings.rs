use serde::{Deserialize, Serialize};

/// Storage key the whole application state is written under.
pub const DEFAULT_STORAGE_KEY: &str = "networth-tracker-state-v1";

/// Tracker configuration supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency used when formatting values for display (e.g., "USD", "EUR").
    pub default_currency: String,

    /// Key under which the state blob is persisted.
    pub storage_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
