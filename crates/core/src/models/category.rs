use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::CoreError;

/// Category of a tracked asset.
///
/// Serialized with its display name (e.g. `"Real Estate"`) so persisted
/// state stays readable and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    Cash,
    Bank,
    Investments,
    Retirement,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Vehicle,
    Other,
}

impl AssetCategory {
    /// Every asset category, in form/menu order.
    pub const ALL: [AssetCategory; 7] = [
        AssetCategory::Cash,
        AssetCategory::Bank,
        AssetCategory::Investments,
        AssetCategory::Retirement,
        AssetCategory::RealEstate,
        AssetCategory::Vehicle,
        AssetCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "Cash",
            AssetCategory::Bank => "Bank",
            AssetCategory::Investments => "Investments",
            AssetCategory::Retirement => "Retirement",
            AssetCategory::RealEstate => "Real Estate",
            AssetCategory::Vehicle => "Vehicle",
            AssetCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown asset category '{s}'")))
    }
}

/// Category of a tracked liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiabilityCategory {
    #[serde(rename = "Credit Card")]
    CreditCard,
    Mortgage,
    #[serde(rename = "Student Loan")]
    StudentLoan,
    #[serde(rename = "Personal Loan")]
    PersonalLoan,
    #[serde(rename = "Auto Loan")]
    AutoLoan,
    Other,
}

impl LiabilityCategory {
    pub const ALL: [LiabilityCategory; 6] = [
        LiabilityCategory::CreditCard,
        LiabilityCategory::Mortgage,
        LiabilityCategory::StudentLoan,
        LiabilityCategory::PersonalLoan,
        LiabilityCategory::AutoLoan,
        LiabilityCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiabilityCategory::CreditCard => "Credit Card",
            LiabilityCategory::Mortgage => "Mortgage",
            LiabilityCategory::StudentLoan => "Student Loan",
            LiabilityCategory::PersonalLoan => "Personal Loan",
            LiabilityCategory::AutoLoan => "Auto Loan",
            LiabilityCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for LiabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiabilityCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LiabilityCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CoreError::ValidationError(format!("Unknown liability category '{s}'"))
            })
    }
}

/// Per-category asset subtotals recorded inside a snapshot.
///
/// Keys are the closed [`AssetCategory`] enum, so a breakdown can never hold
/// an unknown category. Serialized as a plain JSON object keyed by the
/// category display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(BTreeMap<AssetCategory, f64>);

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Recorded subtotal for `category`, or `None` if the category is absent.
    pub fn get(&self, category: AssetCategory) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn set(&mut self, category: AssetCategory, value: f64) {
        self.0.insert(category, value);
    }

    /// Add `delta` to the category's subtotal, treating a missing category as 0.
    pub fn add(&mut self, category: AssetCategory, delta: f64) {
        *self.0.entry(category).or_insert(0.0) += delta;
    }

    pub fn remove(&mut self, category: AssetCategory) -> Option<f64> {
        self.0.remove(&category)
    }

    pub fn contains(&self, category: AssetCategory) -> bool {
        self.0.contains_key(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all recorded subtotals.
    pub fn total(&self) -> f64 {
        self.0.values().fold(0.0, |sum, v| sum + v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    /// `None` when empty, so snapshots never store an empty breakdown.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl FromIterator<(AssetCategory, f64)> for CategoryBreakdown {
    fn from_iter<I: IntoIterator<Item = (AssetCategory, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
