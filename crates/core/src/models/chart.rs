use serde::{Deserialize, Serialize};

use super::category::AssetCategory;

/// One point of the net-worth trend chart.
///
/// The core computes the numbers; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    /// Abbreviated month and 2-digit year, e.g. "Jan 26"
    pub label: String,

    /// assets − liabilities
    pub net: f64,

    pub assets: f64,

    pub liabilities: f64,
}

/// One bar of the month-over-month asset chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetChangePoint {
    pub label: String,

    /// Asset value at this point (total, or the filtered category's subtotal)
    pub assets: f64,

    /// Difference from the previous point; 0 for the first point
    pub change: f64,

    /// `change / previous × 100`; `None` without a previous point or when it was 0
    pub change_pct: Option<f64>,
}

/// Which asset values the month-over-month series tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Snapshot total assets
    #[default]
    All,
    /// A single category's recorded subtotal; snapshots without it are skipped
    Category(AssetCategory),
}

impl From<AssetCategory> for CategoryFilter {
    fn from(category: AssetCategory) -> Self {
        CategoryFilter::Category(category)
    }
}

/// Summed value of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal<C> {
    pub category: C,
    pub total: f64,
}

/// A category's total and its share of the whole, for allocation charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationShare<C> {
    pub category: C,
    pub total: f64,
    /// Percentage of the overall total (0 when the overall total is 0)
    pub share_pct: f64,
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    /// Current net worth minus the net of the latest snapshot (0 with no snapshots)
    pub change_since_last_snapshot: f64,
}
