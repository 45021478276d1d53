use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::category::{AssetCategory, LiabilityCategory};
use crate::models::entry::{AssetEntry, LiabilityEntry};
use crate::models::snapshot::month_start;

/// Raw form input for a new entry, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub name: String,

    /// Numeric value as text
    pub value: String,

    /// Month in `YYYY-MM` form; blank or `None` means the current month
    pub month: Option<String>,

    /// Optional APR as text (liabilities only; ignored for assets)
    pub apr: Option<String>,
}

impl EntryDraft {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            month: None,
            apr: None,
        }
    }

    pub fn in_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_apr(mut self, apr: impl Into<String>) -> Self {
        self.apr = Some(apr.into());
        self
    }
}

/// Turns raw form input into validated entries.
///
/// Rules:
/// - Name must be non-empty after trimming
/// - Value must be a finite number ≥ 0
/// - APR, when given and non-blank, must be a finite number ≥ 0
/// - Month must be `YYYY-MM`; blank falls back to the month of `today`
pub struct EntryService;

impl EntryService {
    pub fn new() -> Self {
        Self
    }

    pub fn build_asset(
        &self,
        draft: &EntryDraft,
        category: AssetCategory,
        today: NaiveDate,
    ) -> Result<AssetEntry, CoreError> {
        let name = parse_name(&draft.name)?;
        let value = parse_non_negative("value", &draft.value)?;
        let month = parse_month(draft.month.as_deref(), today)?;
        Ok(AssetEntry::new(name, category, value, month))
    }

    pub fn build_liability(
        &self,
        draft: &EntryDraft,
        category: LiabilityCategory,
        today: NaiveDate,
    ) -> Result<LiabilityEntry, CoreError> {
        let name = parse_name(&draft.name)?;
        let value = parse_non_negative("value", &draft.value)?;
        let apr = match draft.apr.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_non_negative("APR", text)?),
            _ => None,
        };
        let month = parse_month(draft.month.as_deref(), today)?;
        Ok(LiabilityEntry::new(name, category, value, apr, month))
    }
}

impl Default for EntryService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_name(raw: &str) -> Result<&str, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::ValidationError("Name must not be empty".into()));
    }
    Ok(name)
}

fn parse_non_negative(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("{field} '{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(CoreError::ValidationError(format!("{field} must be finite")));
    }
    if value < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(value)
}

/// Parse a `YYYY-MM` month into its first day.
pub fn parse_month(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
            .map_err(|_| CoreError::ValidationError(format!("Invalid month '{text}': expected YYYY-MM"))),
        _ => Ok(month_start(today)),
    }
}
