use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::entry::{AssetEntry, LiabilityEntry};
use crate::models::snapshot::{month_start, Snapshot, SnapshotDelta};
use crate::services::aggregation_service::AggregationService;

/// Maintains the snapshot ledger: one aggregate point per month, kept
/// sorted by date ascending.
///
/// Adding an entry merges its value into its month (creating the month on
/// first use); removing an entry subtracts it again. Capturing recomputes a
/// month from the full entry lists.
pub struct LedgerService {
    aggregation_service: AggregationService,
}

impl LedgerService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// Merge `delta` into the snapshot for `date`, creating it if needed.
    ///
    /// Existing totals (and the category subtotal, when a category is given)
    /// are increased by the deltas; a new snapshot starts from zero. The
    /// ledger is re-sorted by date afterwards.
    pub fn upsert_snapshot(&self, snapshots: &mut Vec<Snapshot>, date: NaiveDate, delta: SnapshotDelta) {
        match snapshots.iter_mut().find(|s| s.date == date) {
            Some(existing) => {
                existing.total_assets += delta.assets_delta;
                existing.total_liabilities += delta.liabilities_delta;
                if let Some(category) = delta.asset_category {
                    let mut breakdown = existing.asset_category_totals.take().unwrap_or_default();
                    breakdown.add(category, delta.assets_delta);
                    existing.asset_category_totals = breakdown.non_empty();
                }
                debug!(%date, ?delta, "Merged delta into existing snapshot");
            }
            None => {
                let mut snapshot = Snapshot::new(date, delta.assets_delta, delta.liabilities_delta);
                if let Some(category) = delta.asset_category {
                    snapshot.asset_category_totals =
                        Some(std::iter::once((category, delta.assets_delta)).collect());
                }
                snapshots.push(snapshot);
                debug!(%date, ?delta, "Created snapshot");
            }
        }

        snapshots.sort_by_key(|s| s.date);
    }

    /// Subtract `delta` from the snapshot for `date`.
    ///
    /// When no snapshot has exactly that date, the most recent snapshot is
    /// used instead. Totals and the category subtotal are floored at 0, and a
    /// category that reaches exactly 0 is dropped from the breakdown.
    ///
    /// Returns the date of the snapshot that was changed, or `None` for an
    /// empty ledger.
    pub fn apply_removal(
        &self,
        snapshots: &mut Vec<Snapshot>,
        date: NaiveDate,
        delta: SnapshotDelta,
    ) -> Option<NaiveDate> {
        if snapshots.is_empty() {
            return None;
        }

        snapshots.sort_by_key(|s| s.date);
        let index = match snapshots.iter().position(|s| s.date == date) {
            Some(index) => index,
            None => {
                let fallback = snapshots.len() - 1;
                warn!(
                    requested = %date,
                    applied = %snapshots[fallback].date,
                    "No snapshot for entry month; removing from the latest snapshot"
                );
                fallback
            }
        };

        let target = &mut snapshots[index];
        target.total_assets = (target.total_assets - delta.assets_delta).max(0.0);
        target.total_liabilities = (target.total_liabilities - delta.liabilities_delta).max(0.0);

        if let Some(category) = delta.asset_category {
            let mut breakdown = target.asset_category_totals.take().unwrap_or_default();
            let next = (breakdown.get(category).unwrap_or(0.0) - delta.assets_delta).max(0.0);
            if next == 0.0 {
                breakdown.remove(category);
            } else {
                breakdown.set(category, next);
            }
            target.asset_category_totals = breakdown.non_empty();
        }

        debug!(date = %target.date, ?delta, "Removed delta from snapshot");
        Some(target.date)
    }

    /// Recompute the snapshot for the month containing `date` from the full
    /// entry lists, replacing any existing record for that month.
    pub fn capture_snapshot(
        &self,
        snapshots: &mut Vec<Snapshot>,
        date: NaiveDate,
        assets: &[AssetEntry],
        liabilities: &[LiabilityEntry],
    ) -> Snapshot {
        let date = month_start(date);
        let snapshot = Snapshot::new(
            date,
            self.aggregation_service.total_assets(assets),
            self.aggregation_service.total_liabilities(liabilities),
        )
        .with_breakdown(self.aggregation_service.category_totals(assets));

        match snapshots.iter_mut().find(|s| s.date == date) {
            Some(existing) => *existing = snapshot.clone(),
            None => {
                snapshots.push(snapshot.clone());
                snapshots.sort_by_key(|s| s.date);
            }
        }

        debug!(%date, total_assets = snapshot.total_assets, "Captured snapshot");
        snapshot
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
