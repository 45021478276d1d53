use crate::models::category::CategoryBreakdown;
use crate::models::chart::{AllocationShare, CategoryTotal};
use crate::models::entry::{AssetEntry, Categorized, LiabilityEntry};

/// Rolls entry lists up into totals and category groupings.
///
/// Pure business logic with no I/O. Empty input always yields zero / empty output.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of all asset values.
    pub fn total_assets(&self, assets: &[AssetEntry]) -> f64 {
        sum_values(assets)
    }

    /// Sum of all liability balances.
    pub fn total_liabilities(&self, liabilities: &[LiabilityEntry]) -> f64 {
        sum_values(liabilities)
    }

    /// Total assets minus total liabilities. Can be negative.
    pub fn net_worth(&self, assets: &[AssetEntry], liabilities: &[LiabilityEntry]) -> f64 {
        self.total_assets(assets) - self.total_liabilities(liabilities)
    }

    /// Sum values per category, largest total first.
    ///
    /// Categories that do not occur in `entries` are omitted. Equal totals
    /// keep the order in which their category was first seen.
    pub fn grouped_totals<E: Categorized>(&self, entries: &[E]) -> Vec<CategoryTotal<E::Category>> {
        let mut groups: Vec<CategoryTotal<E::Category>> = Vec::new();

        for entry in entries {
            match groups.iter_mut().find(|g| g.category == entry.category()) {
                Some(group) => group.total += entry.value(),
                None => groups.push(CategoryTotal {
                    category: entry.category(),
                    total: entry.value(),
                }),
            }
        }

        // Stable sort: ties stay in first-seen order
        groups.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        groups
    }

    /// Per-category asset subtotals in keyed form, as stored in a snapshot.
    pub fn category_totals(&self, assets: &[AssetEntry]) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::new();
        for asset in assets {
            breakdown.add(asset.category, asset.value);
        }
        breakdown
    }

    /// Grouped totals with each group's percentage of the overall total.
    pub fn allocation<E: Categorized>(&self, entries: &[E]) -> Vec<AllocationShare<E::Category>> {
        let overall = sum_values(entries);
        self.grouped_totals(entries)
            .into_iter()
            .map(|group| AllocationShare {
                category: group.category,
                total: group.total,
                share_pct: if overall > 0.0 {
                    (group.total / overall) * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_values<E: Categorized>(entries: &[E]) -> f64 {
    entries.iter().fold(0.0, |sum, e| sum + e.value())
}
