//! Materializes recurring rules into concrete ledger entries for one month.

use super::{
    entry::{AutofillKey, BudgetEntry, AUTOFILL_NOTE},
    month::Month,
    rule::BudgetRule,
};

/// Amount tolerance for matching legacy autofilled entries that predate [`AutofillKey`].
pub const LEGACY_AMOUNT_TOLERANCE: f64 = 1e-6;

/// Builds one entry per rule active in `month`, dated to the first of the month.
pub fn autofill_candidates(rules: &[BudgetRule], month: Month) -> Vec<BudgetEntry> {
    rules
        .iter()
        .filter(|rule| rule.is_active(month))
        .map(|rule| {
            let mut entry = BudgetEntry::new(
                month.start(),
                rule.kind,
                rule.category.clone(),
                rule.amount_at(month),
            )
            .with_note(AUTOFILL_NOTE);
            entry.autofill = Some(AutofillKey {
                rule_id: rule.id,
                month,
            });
            entry
        })
        .collect()
}

/// Drops candidates already represented in `existing` and returns the rest.
pub fn reconcile(candidates: Vec<BudgetEntry>, existing: &[&BudgetEntry]) -> Vec<BudgetEntry> {
    candidates
        .into_iter()
        .filter(|candidate| !existing.iter().any(|entry| is_duplicate(candidate, entry)))
        .collect()
}

fn is_duplicate(candidate: &BudgetEntry, existing: &BudgetEntry) -> bool {
    match (candidate.autofill, existing.autofill) {
        (Some(wanted), Some(present)) => wanted == present,
        // Entries written before keys existed only carry the sentinel note.
        (_, None) => {
            existing.carries_autofill_note()
                && existing.kind == candidate.kind
                && existing.category == candidate.category
                && (existing.amount - candidate.amount).abs() < LEGACY_AMOUNT_TOLERANCE
        }
        (None, Some(_)) => false,
    }
}
