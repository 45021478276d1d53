use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::category::{AssetCategory, LiabilityCategory};
use super::snapshot::month_start;

/// Anything that can be grouped by category and summed by value.
///
/// Implemented by both entry kinds so aggregation works on either list.
pub trait Categorized {
    type Category: Copy + Eq;

    fn category(&self) -> Self::Category;
    fn value(&self) -> f64;
}

/// A single asset the user owns (bank account, retirement fund, house...).
///
/// Entries are immutable once recorded; removing and re-adding is the only
/// way to change one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    /// Unique identifier (UUID v4 for entries created through the tracker)
    pub id: String,

    /// Display name, already trimmed
    pub name: String,

    pub category: AssetCategory,

    /// Current value, never negative
    pub value: f64,

    /// First day of the month this entry is recorded against
    #[serde(deserialize_with = "deserialize_month")]
    pub updated_at: NaiveDate,
}

impl AssetEntry {
    pub fn new(
        name: impl Into<String>,
        category: AssetCategory,
        value: f64,
        month: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            value,
            updated_at: month_start(month),
        }
    }

    /// Key of the snapshot this entry contributes to.
    pub fn snapshot_date(&self) -> NaiveDate {
        month_start(self.updated_at)
    }
}

impl Categorized for AssetEntry {
    type Category = AssetCategory;

    fn category(&self) -> AssetCategory {
        self.category
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// A single debt the user owes (mortgage, credit card...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityEntry {
    pub id: String,

    pub name: String,

    pub category: LiabilityCategory,

    /// Outstanding balance, never negative
    pub value: f64,

    /// Annual percentage rate, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(deserialize_with = "deserialize_month")]
    pub updated_at: NaiveDate,
}

impl LiabilityEntry {
    pub fn new(
        name: impl Into<String>,
        category: LiabilityCategory,
        value: f64,
        apr: Option<f64>,
        month: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            value,
            apr,
            due_date: None,
            updated_at: month_start(month),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn snapshot_date(&self) -> NaiveDate {
        month_start(self.updated_at)
    }
}

impl Categorized for LiabilityEntry {
    type Category = LiabilityCategory;

    fn category(&self) -> LiabilityCategory {
        self.category
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// Accepts either a plain `YYYY-MM-DD` date or a full ISO-8601 timestamp
/// (only the leading date part is kept).
fn deserialize_month<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
