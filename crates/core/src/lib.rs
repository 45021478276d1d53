pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use std::sync::Once;
use tracing::{debug, info, warn};

use models::{
    category::{AssetCategory, LiabilityCategory},
    chart::{AllocationShare, AssetChangePoint, CategoryFilter, CategoryTotal, DashboardSummary, NetWorthPoint},
    entry::{AssetEntry, LiabilityEntry},
    settings::Settings,
    snapshot::{Snapshot, SnapshotDelta},
    state::AppState,
};
use services::{
    aggregation_service::AggregationService,
    chart_service::ChartService,
    entry_service::{EntryDraft, EntryService},
    format_service,
    ledger_service::LedgerService,
};
use storage::{manager::StorageManager, store::KeyValueStore};

use errors::CoreError;

static TRACING_INIT: Once = Once::new();

/// Install a global `tracing` fmt subscriber, honouring `RUST_LOG`.
///
/// Defaults to `networth_tracker_core=info`. Safe to call more than once;
/// only the first call has an effect, and an already-installed subscriber
/// is left alone.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("networth_tracker_core=info"));

        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Main entry point for the NetWorth Tracker core library.
///
/// Holds the application state, the store it is persisted to, and the
/// services that operate on it. Every action transitions the state and then
/// writes the whole state back to the store. A failed write is logged and
/// dropped; the state stays marked as having unsaved changes.
#[must_use]
pub struct NetWorthTracker<S: KeyValueStore> {
    state: AppState,
    store: S,
    settings: Settings,
    aggregation_service: AggregationService,
    ledger_service: LedgerService,
    chart_service: ChartService,
    entry_service: EntryService,
    /// Tracks whether any mutation has not reached the store yet.
    dirty: bool,
}

impl<S: KeyValueStore> std::fmt::Debug for NetWorthTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetWorthTracker")
            .field("assets", &self.state.assets.len())
            .field("liabilities", &self.state.liabilities.len())
            .field("snapshots", &self.state.snapshots.len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: KeyValueStore> NetWorthTracker<S> {
    /// Load state from `store` (demo data if missing or unreadable).
    pub fn load(store: S, settings: Settings) -> Self {
        let state = StorageManager::load_state(&store, &settings.storage_key);
        Self::build(state, store, settings)
    }

    /// Load with default settings.
    pub fn load_default(store: S) -> Self {
        Self::load(store, Settings::default())
    }

    /// Start from an explicit state without reading the store.
    pub fn from_state(state: AppState, store: S, settings: Settings) -> Self {
        let mut tracker = Self::build(state, store, settings);
        tracker.dirty = true;
        tracker
    }

    /// Write the full state to the store.
    /// Clears the unsaved-changes flag on success.
    pub fn save(&mut self) -> Result<(), CoreError> {
        StorageManager::save_state(&mut self.store, &self.settings.storage_key, &self.state)?;
        self.dirty = false;
        Ok(())
    }

    // ── Entries ─────────────────────────────────────────────────────

    /// Add an asset recorded against the draft's month (current month if blank).
    ///
    /// Invalid input is ignored: returns `None` and nothing changes.
    pub fn add_asset(&mut self, draft: &EntryDraft, category: AssetCategory) -> Option<String> {
        self.add_asset_at(draft, category, Utc::now().date_naive())
    }

    /// Like [`Self::add_asset`], with an explicit "today" for the month default.
    pub fn add_asset_at(
        &mut self,
        draft: &EntryDraft,
        category: AssetCategory,
        today: NaiveDate,
    ) -> Option<String> {
        let entry = match self.entry_service.build_asset(draft, category, today) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Ignoring invalid asset input");
                return None;
            }
        };

        let id = entry.id.clone();
        self.ledger_service.upsert_snapshot(
            &mut self.state.snapshots,
            entry.snapshot_date(),
            SnapshotDelta::asset(entry.value, entry.category),
        );
        info!(%id, category = %entry.category, value = entry.value, "Added asset");
        self.state.assets.insert(0, entry);
        self.commit();
        Some(id)
    }

    /// Add a liability recorded against the draft's month (current month if blank).
    ///
    /// Invalid input is ignored: returns `None` and nothing changes.
    pub fn add_liability(&mut self, draft: &EntryDraft, category: LiabilityCategory) -> Option<String> {
        self.add_liability_at(draft, category, Utc::now().date_naive())
    }

    pub fn add_liability_at(
        &mut self,
        draft: &EntryDraft,
        category: LiabilityCategory,
        today: NaiveDate,
    ) -> Option<String> {
        let entry = match self.entry_service.build_liability(draft, category, today) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Ignoring invalid liability input");
                return None;
            }
        };

        let id = entry.id.clone();
        self.ledger_service.upsert_snapshot(
            &mut self.state.snapshots,
            entry.snapshot_date(),
            SnapshotDelta::liability(entry.value),
        );
        info!(%id, category = %entry.category, value = entry.value, "Added liability");
        self.state.liabilities.insert(0, entry);
        self.commit();
        Some(id)
    }

    /// Remove an asset and subtract it from its month's snapshot.
    /// Unknown ids are ignored.
    pub fn remove_asset(&mut self, id: &str) -> Option<AssetEntry> {
        let index = self.state.assets.iter().position(|a| a.id == id)?;
        let removed = self.state.assets.remove(index);
        self.ledger_service.apply_removal(
            &mut self.state.snapshots,
            removed.snapshot_date(),
            SnapshotDelta::asset(removed.value, removed.category),
        );
        info!(%id, "Removed asset");
        self.commit();
        Some(removed)
    }

    /// Remove a liability and subtract it from its month's snapshot.
    /// Unknown ids are ignored.
    pub fn remove_liability(&mut self, id: &str) -> Option<LiabilityEntry> {
        let index = self.state.liabilities.iter().position(|l| l.id == id)?;
        let removed = self.state.liabilities.remove(index);
        self.ledger_service.apply_removal(
            &mut self.state.snapshots,
            removed.snapshot_date(),
            SnapshotDelta::liability(removed.value),
        );
        info!(%id, "Removed liability");
        self.commit();
        Some(removed)
    }

    /// Get a single asset by its ID.
    #[must_use]
    pub fn get_asset(&self, id: &str) -> Option<&AssetEntry> {
        self.state.assets.iter().find(|a| a.id == id)
    }

    /// Get a single liability by its ID.
    #[must_use]
    pub fn get_liability(&self, id: &str) -> Option<&LiabilityEntry> {
        self.state.liabilities.iter().find(|l| l.id == id)
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Record this month's snapshot from the full current totals,
    /// overwriting any snapshot already stored for this month.
    pub fn capture_snapshot(&mut self) -> Snapshot {
        self.capture_snapshot_for(Utc::now().date_naive())
    }

    /// Record the snapshot for the month containing `date` from the full
    /// current totals.
    pub fn capture_snapshot_for(&mut self, date: NaiveDate) -> Snapshot {
        let snapshot = self.ledger_service.capture_snapshot(
            &mut self.state.snapshots,
            date,
            &self.state.assets,
            &self.state.liabilities,
        );
        info!(date = %snapshot.date, net = snapshot.net(), "Captured snapshot");
        self.commit();
        snapshot
    }

    // ── Totals & Groupings ──────────────────────────────────────────

    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.aggregation_service.total_assets(&self.state.assets)
    }

    #[must_use]
    pub fn total_liabilities(&self) -> f64 {
        self.aggregation_service.total_liabilities(&self.state.liabilities)
    }

    #[must_use]
    pub fn net_worth(&self) -> f64 {
        self.aggregation_service
            .net_worth(&self.state.assets, &self.state.liabilities)
    }

    #[must_use]
    pub fn grouped_asset_totals(&self) -> Vec<CategoryTotal<AssetCategory>> {
        self.aggregation_service.grouped_totals(&self.state.assets)
    }

    #[must_use]
    pub fn grouped_liability_totals(&self) -> Vec<CategoryTotal<LiabilityCategory>> {
        self.aggregation_service.grouped_totals(&self.state.liabilities)
    }

    /// Asset allocation for the pie chart, largest category first.
    #[must_use]
    pub fn asset_allocation(&self) -> Vec<AllocationShare<AssetCategory>> {
        self.aggregation_service.allocation(&self.state.assets)
    }

    // ── Charts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn net_worth_series(&self) -> Vec<NetWorthPoint> {
        self.chart_service.net_worth_series(&self.state.snapshots)
    }

    #[must_use]
    pub fn asset_mom_series(&self, filter: CategoryFilter) -> Vec<AssetChangePoint> {
        self.chart_service.asset_mom_series(&self.state.snapshots, filter)
    }

    #[must_use]
    pub fn dashboard_summary(&self) -> DashboardSummary {
        self.chart_service.dashboard_summary(
            &self.state.assets,
            &self.state.liabilities,
            &self.state.snapshots,
        )
    }

    /// Format a value in the configured display currency.
    #[must_use]
    pub fn format_currency(&self, value: f64) -> String {
        format_service::format_currency(value, &self.settings.default_currency)
    }

    /// Format a change in the configured currency, always carrying a sign
    /// (`+$5,300`, `-$75`).
    #[must_use]
    pub fn format_change(&self, value: f64) -> String {
        format_service::format_signed_currency(value, &self.settings.default_currency)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency (e.g., "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR)"
            )));
        }
        self.settings.default_currency = trimmed;
        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── State Access ────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Assets, newest first.
    #[must_use]
    pub fn assets(&self) -> &[AssetEntry] {
        &self.state.assets
    }

    /// Liabilities, newest first.
    #[must_use]
    pub fn liabilities(&self) -> &[LiabilityEntry] {
        &self.state.liabilities
    }

    /// Snapshot ledger, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.state.snapshots
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if the latest change has not been written to the store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Replace everything with the built-in demo dataset.
    pub fn reset_to_demo(&mut self) {
        self.state = AppState::demo();
        info!("Reset state to demo data");
        self.commit();
    }

    /// Export the full state as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: AppState, store: S, settings: Settings) -> Self {
        Self {
            state,
            store,
            settings,
            aggregation_service: AggregationService::new(),
            ledger_service: LedgerService::new(),
            chart_service: ChartService::new(),
            entry_service: EntryService::new(),
            dirty: false,
        }
    }

    /// Mark the state changed and persist it, dropping a failed write.
    fn commit(&mut self) {
        self.dirty = true;
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist state; change kept in memory only");
        }
    }
}
