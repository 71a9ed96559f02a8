//! Business logic helpers for ledger entries.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use super::{normalize_label, normalize_note, parse_date_field, require, require_finite};
use crate::{
    core::errors::{PlanError, Result},
    ledger::{Book, BudgetEntry, Month, MonthlyCashFlow, NewEntry},
};

/// Provides validated CRUD helpers for [`BudgetEntry`] records.
pub struct EntryService;

impl EntryService {
    pub fn create(book: &mut Book, input: NewEntry) -> Result<BudgetEntry> {
        let entry = Self::build(Uuid::new_v4(), input)?;
        info!(entry_id = %entry.id, date = %entry.date, "ledger entry created");
        book.add_entry(entry.clone());
        Ok(entry)
    }

    /// Replaces every user-editable field. An autofill key survives the edit so the
    /// entry still counts as materialized for its month.
    pub fn replace(book: &mut Book, id: Uuid, input: NewEntry) -> Result<BudgetEntry> {
        let mut entry = Self::build(id, input)?;
        let slot = book
            .entry_mut(id)
            .ok_or_else(|| PlanError::not_found("Entry", id))?;
        entry.autofill = slot.autofill;
        *slot = entry.clone();
        book.touch();
        info!(entry_id = %id, date = %entry.date, "ledger entry updated");
        Ok(entry)
    }

    pub fn remove(book: &mut Book, id: Uuid) -> Result<BudgetEntry> {
        let removed = book
            .remove_entry(id)
            .ok_or_else(|| PlanError::not_found("Entry", id))?;
        info!(entry_id = %id, "ledger entry removed");
        Ok(removed)
    }

    /// Entries dated in `[from, to)`, oldest first.
    pub fn in_range(book: &Book, from: NaiveDate, to: NaiveDate) -> Result<Vec<&BudgetEntry>> {
        if to < from {
            return Err(PlanError::validation(format!(
                "range end {to} precedes range start {from}"
            )));
        }
        let mut entries = book.entries_between(from, to);
        entries.sort_by_key(|entry| entry.date);
        Ok(entries)
    }

    pub fn in_month(book: &Book, month: Month) -> Vec<&BudgetEntry> {
        let mut entries = book.entries_between(month.start(), month.end_exclusive());
        entries.sort_by_key(|entry| entry.date);
        entries
    }

    /// Totals of the entries actually recorded in `month`.
    pub fn month_summary(book: &Book, month: Month) -> MonthlyCashFlow {
        let mut flow = MonthlyCashFlow::empty(month);
        for entry in Self::in_month(book, month) {
            flow.record(entry.kind, entry.amount);
        }
        flow
    }

    fn build(id: Uuid, input: NewEntry) -> Result<BudgetEntry> {
        let date = parse_date_field("date", input.date.as_deref())?;
        let amount = require_finite("amount", require("amount", input.amount)?)?;
        Ok(BudgetEntry {
            id,
            date,
            kind: input.kind.unwrap_or_default(),
            category: normalize_label(input.category),
            amount,
            note: normalize_note(input.note),
            autofill: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::FlowKind;

    fn entry_input(date: &str, kind: FlowKind, amount: f64) -> NewEntry {
        NewEntry {
            date: Some(date.into()),
            kind: Some(kind),
            category: Some("Groceries".into()),
            amount: Some(amount),
            note: None,
        }
    }

    #[test]
    fn month_summary_totals_recorded_entries() {
        let mut book = Book::new("Entries");
        EntryService::create(&mut book, entry_input("2025-03-02", FlowKind::Expense, 120.0)).unwrap();
        EntryService::create(&mut book, entry_input("2025-03-28", FlowKind::Income, 300.0)).unwrap();
        EntryService::create(&mut book, entry_input("2025-04-01", FlowKind::Expense, 999.0)).unwrap();

        let summary = EntryService::month_summary(&book, Month::new(2025, 3).unwrap());
        assert_eq!(summary.income, 300.0);
        assert_eq!(summary.expense, 120.0);
        assert_eq!(summary.net, 180.0);
    }

    #[test]
    fn in_range_rejects_inverted_bounds_and_sorts() {
        let mut book = Book::new("Entries");
        EntryService::create(&mut book, entry_input("2025-03-20", FlowKind::Expense, 1.0)).unwrap();
        EntryService::create(&mut book, entry_input("2025-03-02", FlowKind::Expense, 2.0)).unwrap();

        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let found = EntryService::in_range(&book, from, to).unwrap();
        assert_eq!(found[0].amount, 2.0);
        assert!(EntryService::in_range(&book, to, from).is_err());
    }

    #[test]
    fn create_requires_a_valid_date() {
        let mut book = Book::new("Entries");
        let mut input = entry_input("2025-02-30", FlowKind::Expense, 5.0);
        assert!(EntryService::create(&mut book, input.clone()).is_err());
        input.date = None;
        assert!(EntryService::create(&mut book, input).is_err());
    }

    #[test]
    fn remove_returns_the_entry_and_rejects_unknown_ids() {
        let mut book = Book::new("Entries");
        let entry =
            EntryService::create(&mut book, entry_input("2025-03-02", FlowKind::Expense, 40.0)).unwrap();
        let removed = EntryService::remove(&mut book, entry.id).unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(EntryService::in_month(&book, Month::new(2025, 3).unwrap()).is_empty());
        assert!(EntryService::remove(&mut book, entry.id)
            .unwrap_err()
            .is_not_found());
    }
}
