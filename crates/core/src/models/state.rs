use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::{AssetCategory, CategoryBreakdown, LiabilityCategory};
use super::entry::{AssetEntry, LiabilityEntry};
use super::snapshot::Snapshot;

/// The whole application state. Everything in here is serialized as one
/// JSON blob and written under a single storage key.
///
/// Entry lists are newest-first; `snapshots` is sorted by date ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub assets: Vec<AssetEntry>,
    pub liabilities: Vec<LiabilityEntry>,
    pub snapshots: Vec<Snapshot>,
}

impl AppState {
    /// Built-in demo dataset shown on first launch or when stored state
    /// cannot be read.
    pub fn demo() -> Self {
        let recorded = ymd(2026, 1);

        let assets = vec![
            demo_asset("a-checking", "Primary Checking", AssetCategory::Bank, 12_800.0, recorded),
            demo_asset("a-401k", "401(k)", AssetCategory::Retirement, 68_400.0, recorded),
            demo_asset("a-home", "Home Value", AssetCategory::RealEstate, 440_000.0, recorded),
        ];

        let liabilities = vec![
            demo_liability(
                "l-mortgage",
                "Mortgage Balance",
                LiabilityCategory::Mortgage,
                295_000.0,
                5.1,
                recorded,
            ),
            demo_liability(
                "l-cc",
                "Credit Card",
                LiabilityCategory::CreditCard,
                2_100.0,
                22.9,
                recorded,
            ),
        ];

        let snapshots = vec![
            demo_snapshot(ymd(2025, 10), 501_000.0, 310_000.0, [10_000.0, 67_000.0, 424_000.0]),
            demo_snapshot(ymd(2025, 11), 507_500.0, 304_500.0, [11_400.0, 67_800.0, 428_300.0]),
            demo_snapshot(ymd(2025, 12), 514_200.0, 301_000.0, [12_000.0, 68_200.0, 434_000.0]),
            demo_snapshot(ymd(2026, 1), 519_500.0, 298_300.0, [12_400.0, 68_400.0, 438_700.0]),
        ];

        Self {
            assets,
            liabilities,
            snapshots,
        }
    }
}

fn ymd(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn demo_asset(
    id: &str,
    name: &str,
    category: AssetCategory,
    value: f64,
    updated_at: NaiveDate,
) -> AssetEntry {
    AssetEntry {
        id: id.into(),
        name: name.into(),
        category,
        value,
        updated_at,
    }
}

fn demo_liability(
    id: &str,
    name: &str,
    category: LiabilityCategory,
    value: f64,
    apr: f64,
    updated_at: NaiveDate,
) -> LiabilityEntry {
    LiabilityEntry {
        id: id.into(),
        name: name.into(),
        category,
        value,
        apr: Some(apr),
        due_date: None,
        updated_at,
    }
}

/// Demo breakdowns cover Bank, Retirement and Real Estate, in that order.
fn demo_snapshot(date: NaiveDate, assets: f64, liabilities: f64, split: [f64; 3]) -> Snapshot {
    let breakdown: CategoryBreakdown = [
        (AssetCategory::Bank, split[0]),
        (AssetCategory::Retirement, split[1]),
        (AssetCategory::RealEstate, split[2]),
    ]
    .into_iter()
    .collect();
    Snapshot::new(date, assets, liabilities).with_breakdown(breakdown)
}
