// ═══════════════════════════════════════════════════════════════════
// Integration Tests — NetWorthTracker facade end to end
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use networth_tracker_core::errors::CoreError;
use networth_tracker_core::models::category::{AssetCategory, LiabilityCategory};
use networth_tracker_core::models::chart::CategoryFilter;
use networth_tracker_core::models::settings::{Settings, DEFAULT_STORAGE_KEY};
use networth_tracker_core::models::state::AppState;
use networth_tracker_core::services::entry_service::EntryDraft;
use networth_tracker_core::storage::manager::StorageManager;
use networth_tracker_core::storage::store::{FileStore, KeyValueStore, MemoryStore};
use networth_tracker_core::NetWorthTracker;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn empty_tracker() -> NetWorthTracker<MemoryStore> {
    NetWorthTracker::from_state(AppState::default(), MemoryStore::new(), Settings::default())
}

fn stored_state(tracker: &NetWorthTracker<MemoryStore>) -> AppState {
    StorageManager::load_state(tracker.store(), DEFAULT_STORAGE_KEY)
}

/// A store that accepts reads but refuses every write.
#[derive(Default)]
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════

mod loading {
    use super::*;

    #[test]
    fn fresh_store_starts_with_demo_data() {
        let tracker = NetWorthTracker::load_default(MemoryStore::new());
        assert_eq!(tracker.state(), &AppState::demo());
        assert_eq!(tracker.assets().len(), 3);
        assert_eq!(tracker.liabilities().len(), 2);
        assert_eq!(tracker.snapshots().len(), 4);
        assert!(!tracker.has_unsaved_changes());
    }

    #[test]
    fn corrupt_store_starts_with_demo_data() {
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, "\u{0}garbage");
        let tracker = NetWorthTracker::load_default(store);
        assert_eq!(tracker.state(), &AppState::demo());
    }

    #[test]
    fn custom_storage_key() {
        let settings = Settings {
            storage_key: "alt-key".into(),
            ..Settings::default()
        };
        let mut tracker = NetWorthTracker::from_state(AppState::default(), MemoryStore::new(), settings.clone());
        tracker.save().unwrap();

        assert!(tracker.store().get("alt-key").unwrap().is_some());
        assert!(tracker.store().get(DEFAULT_STORAGE_KEY).unwrap().is_none());

        let reloaded = NetWorthTracker::load(tracker.store().clone(), settings);
        assert_eq!(reloaded.state(), &AppState::default());
    }

    #[test]
    fn demo_totals() {
        let tracker = NetWorthTracker::load_default(MemoryStore::new());
        assert_eq!(tracker.total_assets(), 521_200.0);
        assert_eq!(tracker.total_liabilities(), 297_100.0);
        assert_eq!(tracker.net_worth(), 224_100.0);

        let summary = tracker.dashboard_summary();
        assert_eq!(summary.change_since_last_snapshot, 224_100.0 - 221_200.0);
        assert_eq!(tracker.format_currency(summary.net_worth), "$224,100");
        assert_eq!(tracker.format_change(summary.change_since_last_snapshot), "+$2,900");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Adding entries
// ═══════════════════════════════════════════════════════════════════

mod adding {
    use super::*;

    #[test]
    fn add_asset_prepends_and_updates_month() {
        let mut tracker = empty_tracker();
        let today = date(2026, 3, 9);

        let first = tracker
            .add_asset_at(&EntryDraft::new("Checking", "1000"), AssetCategory::Bank, today)
            .unwrap();
        let second = tracker
            .add_asset_at(&EntryDraft::new("Wallet", "50"), AssetCategory::Cash, today)
            .unwrap();

        assert_eq!(tracker.assets()[0].id, second);
        assert_eq!(tracker.assets()[1].id, first);
        assert_eq!(tracker.snapshots().len(), 1);
        let snap = &tracker.snapshots()[0];
        assert_eq!(snap.date, date(2026, 3, 1));
        assert_eq!(snap.total_assets, 1_050.0);
        assert_eq!(snap.category_total(AssetCategory::Bank), Some(1_000.0));
        assert_eq!(snap.category_total(AssetCategory::Cash), Some(50.0));
    }

    #[test]
    fn add_liability_with_explicit_month() {
        let mut tracker = empty_tracker();
        let draft = EntryDraft::new("Mortgage", "250000").in_month("2025-09").with_apr("4.2");

        let id = tracker
            .add_liability_at(&draft, LiabilityCategory::Mortgage, date(2026, 3, 9))
            .unwrap();

        let entry = tracker.get_liability(&id).unwrap();
        assert_eq!(entry.apr, Some(4.2));
        assert_eq!(tracker.snapshots()[0].date, date(2025, 9, 1));
        assert_eq!(tracker.snapshots()[0].total_liabilities, 250_000.0);
        assert_eq!(tracker.snapshots()[0].asset_category_totals, None);
    }

    #[test]
    fn invalid_input_is_a_silent_no_op() {
        let mut tracker = empty_tracker();
        tracker.save().unwrap();

        assert!(tracker.add_asset(&EntryDraft::new("", "10"), AssetCategory::Cash).is_none());
        assert!(tracker.add_asset(&EntryDraft::new("Cash", "-5"), AssetCategory::Cash).is_none());
        assert!(tracker
            .add_liability(&EntryDraft::new("Card", "10").with_apr("-1"), LiabilityCategory::CreditCard)
            .is_none());

        assert_eq!(tracker.state(), &AppState::default());
        assert!(!tracker.has_unsaved_changes());
    }

    #[test]
    fn every_change_is_persisted() {
        let mut tracker = empty_tracker();
        tracker.add_asset_at(&EntryDraft::new("Fund", "700"), AssetCategory::Investments, date(2026, 2, 2));

        assert!(!tracker.has_unsaved_changes());
        assert_eq!(&stored_state(&tracker), tracker.state());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Removing entries
// ═══════════════════════════════════════════════════════════════════

mod removing {
    use super::*;

    #[test]
    fn remove_asset_reverses_its_month() {
        let mut tracker = empty_tracker();
        let today = date(2026, 1, 15);
        tracker.add_asset_at(&EntryDraft::new("Checking", "1000"), AssetCategory::Bank, today);
        let cash = tracker
            .add_asset_at(&EntryDraft::new("Wallet", "500"), AssetCategory::Cash, today)
            .unwrap();

        let removed = tracker.remove_asset(&cash).unwrap();

        assert_eq!(removed.name, "Wallet");
        assert!(tracker.get_asset(&cash).is_none());
        let snap = &tracker.snapshots()[0];
        assert_eq!(snap.total_assets, 1_000.0);
        assert_eq!(snap.category_total(AssetCategory::Cash), None);
        assert_eq!(&stored_state(&tracker), tracker.state());
    }

    #[test]
    fn remove_liability_reverses_its_month() {
        let mut tracker = empty_tracker();
        let id = tracker
            .add_liability_at(&EntryDraft::new("Card", "300"), LiabilityCategory::CreditCard, date(2026, 1, 3))
            .unwrap();

        tracker.remove_liability(&id).unwrap();

        assert!(tracker.liabilities().is_empty());
        assert_eq!(tracker.snapshots()[0].total_liabilities, 0.0);
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let mut tracker = NetWorthTracker::load_default(MemoryStore::new());
        assert!(tracker.remove_asset("nope").is_none());
        assert!(tracker.remove_liability("nope").is_none());
        assert_eq!(tracker.state(), &AppState::demo());
    }

    #[test]
    fn demo_entry_removal_hits_january_snapshot() {
        let mut tracker = NetWorthTracker::load_default(MemoryStore::new());

        tracker.remove_asset("a-home").unwrap();

        let jan = tracker.snapshots().last().unwrap();
        assert_eq!(jan.date, date(2026, 1, 1));
        assert_eq!(jan.total_assets, 519_500.0 - 440_000.0);
        assert_eq!(jan.category_total(AssetCategory::RealEstate), None);
        assert_eq!(tracker.snapshots()[2].total_assets, 514_200.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Capture & charts
// ═══════════════════════════════════════════════════════════════════

mod capture_and_charts {
    use super::*;

    #[test]
    fn capture_recomputes_from_totals() {
        let mut tracker = NetWorthTracker::load_default(MemoryStore::new());

        let snap = tracker.capture_snapshot_for(date(2026, 1, 20));

        assert_eq!(tracker.snapshots().len(), 4);
        assert_eq!(snap.total_assets, 521_200.0);
        assert_eq!(snap.total_liabilities, 297_100.0);
        assert_eq!(snap.category_total(AssetCategory::Bank), Some(12_800.0));
        assert_eq!(tracker.dashboard_summary().change_since_last_snapshot, 0.0);
    }

    #[test]
    fn capture_new_month_appends() {
        let mut tracker = NetWorthTracker::load_default(MemoryStore::new());
        tracker.capture_snapshot_for(date(2026, 2, 5));

        let series = tracker.net_worth_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[4].label, "Feb 26");
        assert_eq!(series[4].net, 224_100.0);
    }

    #[test]
    fn demo_mom_series() {
        let tracker = NetWorthTracker::load_default(MemoryStore::new());

        let all = tracker.asset_mom_series(CategoryFilter::All);
        let changes: Vec<f64> = all.iter().map(|p| p.change).collect();
        assert_eq!(changes, vec![0.0, 6_500.0, 6_700.0, 5_300.0]);
        assert_eq!(all[0].change_pct, None);

        let bank = tracker.asset_mom_series(CategoryFilter::Category(AssetCategory::Bank));
        let changes: Vec<f64> = bank.iter().map(|p| p.change).collect();
        assert_eq!(changes, vec![0.0, 1_400.0, 600.0, 400.0]);
        let pct = bank[1].change_pct.unwrap();
        assert!((pct - 14.0).abs() < 1e-9);

        assert!(tracker.asset_mom_series(AssetCategory::Vehicle.into()).is_empty());
    }

    #[test]
    fn groupings_and_allocation() {
        let tracker = NetWorthTracker::load_default(MemoryStore::new());

        let assets = tracker.grouped_asset_totals();
        assert_eq!(assets[0].category, AssetCategory::RealEstate);
        assert_eq!(assets[2].category, AssetCategory::Bank);

        let liabilities = tracker.grouped_liability_totals();
        assert_eq!(liabilities[0].category, LiabilityCategory::Mortgage);
        assert_eq!(liabilities[1].total, 2_100.0);

        let shares: f64 = tracker.asset_allocation().iter().map(|s| s.share_pct).sum();
        assert!((shares - 100.0).abs() < 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Persistence behaviour
// ═══════════════════════════════════════════════════════════════════

mod persistence {
    use super::*;

    #[test]
    fn failed_write_is_dropped_but_state_kept() {
        let mut tracker = NetWorthTracker::load_default(ReadOnlyStore);

        let id = tracker.add_asset_at(&EntryDraft::new("Car", "9000"), AssetCategory::Vehicle, date(2026, 1, 2));

        assert!(id.is_some());
        assert_eq!(tracker.assets().len(), 4);
        assert!(tracker.has_unsaved_changes());
        assert!(matches!(tracker.save(), Err(CoreError::Storage(_))));
    }

    #[test]
    fn state_survives_reopen_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut tracker = NetWorthTracker::load_default(FileStore::new(dir.path()));
            tracker
                .add_asset_at(&EntryDraft::new("Brokerage", "15000"), AssetCategory::Investments, date(2026, 1, 9))
                .unwrap()
        };

        let reopened = NetWorthTracker::load_default(FileStore::new(dir.path()));
        assert_eq!(reopened.assets()[0].id, id);
        assert_eq!(reopened.snapshots()[3].total_assets, 519_500.0 + 15_000.0);
    }

    #[test]
    fn tracker_can_borrow_its_store() {
        let mut store = MemoryStore::new();
        {
            let mut tracker = NetWorthTracker::load_default(&mut store);
            tracker.reset_to_demo();
        }
        assert_eq!(StorageManager::load_state(&store, DEFAULT_STORAGE_KEY), AppState::demo());
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn export_json_is_pretty() {
        let tracker = empty_tracker();
        let json = tracker.export_json().unwrap();
        assert!(json.contains("\"assets\": []"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn currency_code_validation() {
        let mut tracker = empty_tracker();
        assert!(tracker.set_default_currency(" eur ").is_ok());
        assert_eq!(tracker.settings().default_currency, "EUR");
        assert_eq!(tracker.format_currency(-1_500.0), "-EUR 1,500");
        assert_eq!(tracker.format_change(1_500.0), "+EUR 1,500");
        assert_eq!(tracker.format_change(-40.0), "-EUR 40");

        assert!(matches!(tracker.set_default_currency("EURO"), Err(CoreError::ValidationError(_))));
        assert!(tracker.set_default_currency("U$D").is_err());
        assert_eq!(tracker.settings().default_currency, "EUR");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Tracing
// ═══════════════════════════════════════════════════════════════════

mod tracing_setup {
    #[test]
    fn init_tracing_is_idempotent() {
        networth_tracker_core::init_tracing();
        networth_tracker_core::init_tracing();
    }
}
