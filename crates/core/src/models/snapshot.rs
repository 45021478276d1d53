use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::category::{AssetCategory, CategoryBreakdown};

/// A recorded monthly aggregate of totals.
///
/// `date` is always the first day of a month and is the natural key of the
/// ledger: at most one snapshot exists per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,

    pub total_assets: f64,

    pub total_liabilities: f64,

    /// Per-category asset subtotals. Omitted rather than stored empty.
    #[serde(
        default,
        deserialize_with = "deserialize_breakdown",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset_category_totals: Option<CategoryBreakdown>,
}

impl Snapshot {
    pub fn new(date: NaiveDate, total_assets: f64, total_liabilities: f64) -> Self {
        Self {
            date,
            total_assets,
            total_liabilities,
            asset_category_totals: None,
        }
    }

    pub fn with_breakdown(mut self, breakdown: CategoryBreakdown) -> Self {
        self.asset_category_totals = breakdown.non_empty();
        self
    }

    pub fn net(&self) -> f64 {
        self.total_assets - self.total_liabilities
    }

    /// Recorded subtotal for one asset category, if the snapshot has one.
    pub fn category_total(&self, category: AssetCategory) -> Option<f64> {
        self.asset_category_totals
            .as_ref()
            .and_then(|b| b.get(category))
    }
}

/// Reads a stored breakdown, treating `{}` the same as an absent one.
fn deserialize_breakdown<'de, D>(deserializer: D) -> Result<Option<CategoryBreakdown>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CategoryBreakdown>::deserialize(deserializer)?.and_then(CategoryBreakdown::non_empty))
}

/// An incremental change applied to one month of the ledger.
///
/// Produced when an entry is added or removed: an asset contributes to
/// `assets_delta` and its category, a liability only to `liabilities_delta`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapshotDelta {
    pub assets_delta: f64,
    pub liabilities_delta: f64,
    pub asset_category: Option<AssetCategory>,
}

impl SnapshotDelta {
    pub fn asset(value: f64, category: AssetCategory) -> Self {
        Self {
            assets_delta: value,
            liabilities_delta: 0.0,
            asset_category: Some(category),
        }
    }

    pub fn liability(value: f64) -> Self {
        Self {
            assets_delta: 0.0,
            liabilities_delta: value,
            asset_category: None,
        }
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
