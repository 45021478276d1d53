use crate::models::chart::{AssetChangePoint, CategoryFilter, DashboardSummary, NetWorthPoint};
use crate::models::entry::{AssetEntry, LiabilityEntry};
use crate::models::snapshot::Snapshot;
use crate::services::aggregation_service::AggregationService;
use crate::services::format_service::month_label;

/// Generates chart-ready data sets from the snapshot ledger.
///
/// The core computes all the numbers; the frontend only renders.
/// Every series follows ledger order (date ascending).
pub struct ChartService {
    aggregation_service: AggregationService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// One net-worth point per snapshot. Each point stands alone.
    pub fn net_worth_series(&self, snapshots: &[Snapshot]) -> Vec<NetWorthPoint> {
        snapshots
            .iter()
            .map(|s| NetWorthPoint {
                label: month_label(s.date),
                net: s.net(),
                assets: s.total_assets,
                liabilities: s.total_liabilities,
            })
            .collect()
    }

    /// Month-over-month asset change.
    ///
    /// With [`CategoryFilter::All`] every snapshot contributes its total
    /// assets. With a single category, only snapshots that recorded a
    /// subtotal for it take part, so each change is measured against the
    /// nearest earlier snapshot that has the category, not the calendar
    /// month before.
    pub fn asset_mom_series(&self, snapshots: &[Snapshot], filter: CategoryFilter) -> Vec<AssetChangePoint> {
        let values: Vec<(String, f64)> = snapshots
            .iter()
            .filter_map(|s| {
                let assets = match filter {
                    CategoryFilter::All => Some(s.total_assets),
                    CategoryFilter::Category(category) => s.category_total(category),
                };
                assets.map(|a| (month_label(s.date), a))
            })
            .collect();

        let mut previous: Option<f64> = None;
        values
            .into_iter()
            .map(|(label, assets)| {
                let change = previous.map_or(0.0, |p| assets - p);
                let change_pct = match previous {
                    Some(p) if p != 0.0 => Some((change / p) * 100.0),
                    _ => None,
                };
                previous = Some(assets);
                AssetChangePoint {
                    label,
                    assets,
                    change,
                    change_pct,
                }
            })
            .collect()
    }

    /// Headline totals plus the change in net worth since the latest snapshot.
    pub fn dashboard_summary(
        &self,
        assets: &[AssetEntry],
        liabilities: &[LiabilityEntry],
        snapshots: &[Snapshot],
    ) -> DashboardSummary {
        let total_assets = self.aggregation_service.total_assets(assets);
        let total_liabilities = self.aggregation_service.total_liabilities(liabilities);
        let net_worth = total_assets - total_liabilities;
        let latest_net = snapshots.last().map_or(net_worth, Snapshot::net);

        DashboardSummary {
            total_assets,
            total_liabilities,
            net_worth,
            change_since_last_snapshot: net_worth - latest_net,
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
