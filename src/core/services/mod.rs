//! Validated operations over a [`Book`](crate::ledger::Book).

pub mod asset_service;
pub mod autofill_service;
pub mod entry_service;
pub mod plan_service;
pub mod rule_service;
pub mod snapshot_service;

pub use asset_service::AssetService;
pub use autofill_service::{AutofillRequest, AutofillService};
pub use entry_service::EntryService;
pub use plan_service::{PlanService, ProjectionDefaults};
pub use rule_service::RuleService;
pub use snapshot_service::SnapshotService;

use chrono::NaiveDate;

use crate::{
    core::errors::{PlanError, Result},
    ledger::Month,
};

pub(crate) const DEFAULT_CATEGORY: &str = "Uncategorized";

pub(crate) fn require<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PlanError::validation(format!("`{field}` is required")))
}

pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlanError::validation(format!("`{field}` must be a finite number")))
    }
}

/// Validates a rate that is later raised to a fractional power: finite and above -100%.
pub(crate) fn require_rate(field: &str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value <= -1.0 {
        return Err(PlanError::validation(format!(
            "`{field}` must be greater than -1, got {value}"
        )));
    }
    Ok(value)
}

pub(crate) fn parse_month_field(field: &str, value: Option<&str>) -> Result<Month> {
    let raw = require(field, value.filter(|raw| !raw.trim().is_empty()))?;
    Month::parse(raw)
}

pub(crate) fn parse_optional_month(value: Option<&str>) -> Result<Option<Month>> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Month::parse(raw).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn parse_date_field(field: &str, value: Option<&str>) -> Result<NaiveDate> {
    let raw = require(field, value.map(str::trim).filter(|raw| !raw.is_empty()))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        PlanError::validation(format!("invalid date `{raw}` for `{field}`, expected YYYY-MM-DD"))
    })
}

pub(crate) fn normalize_label(value: Option<String>) -> String {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

pub(crate) fn normalize_note(value: Option<String>) -> String {
    value.map(|raw| raw.trim().to_string()).unwrap_or_default()
}
