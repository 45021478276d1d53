use serde_json::Value;
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::state::AppState;

use super::store::KeyValueStore;

/// Top-level lists every persisted state blob must carry.
const REQUIRED_LISTS: [&str; 3] = ["assets", "liabilities", "snapshots"];

/// High-level storage operations: load/save the application state as one
/// JSON blob under a single key.
pub struct StorageManager;

impl StorageManager {
    /// Load the application state, falling back to [`AppState::demo`].
    ///
    /// The demo dataset is returned when the key is absent or empty, the
    /// store cannot be read, the blob is not valid JSON, any of the three
    /// entry/snapshot lists is missing, or the lists do not decode.
    /// Never fails.
    pub fn load_state<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> AppState {
        let raw = match store.get(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                info!(key, "No stored state; starting from demo data");
                return AppState::demo();
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored state; using demo data");
                return AppState::demo();
            }
        };

        match Self::parse_state(&raw) {
            Ok(state) => {
                info!(
                    assets = state.assets.len(),
                    liabilities = state.liabilities.len(),
                    snapshots = state.snapshots.len(),
                    "Loaded stored state"
                );
                state
            }
            Err(e) => {
                warn!(key, error = %e, "Stored state is invalid; using demo data");
                AppState::demo()
            }
        }
    }

    /// Serialize the full state and write it under `key`.
    pub fn save_state<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        state: &AppState,
    ) -> Result<(), CoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))?;
        store.set(key, &json)
    }

    /// Parse a state blob, checking its shape before decoding it.
    pub fn parse_state(raw: &str) -> Result<AppState, CoreError> {
        let value: Value = serde_json::from_str(raw)?;

        let object = value
            .as_object()
            .ok_or_else(|| CoreError::Deserialization("State is not a JSON object".into()))?;
        for list in REQUIRED_LISTS {
            if !object.get(list).is_some_and(Value::is_array) {
                return Err(CoreError::Deserialization(format!(
                    "State is missing the '{list}' list"
                )));
            }
        }

        let mut state: AppState = serde_json::from_value(value)?;
        state.snapshots.sort_by_key(|s| s.date);
        Ok(state)
    }
}
