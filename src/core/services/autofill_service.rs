//! Boundary wrapper around the autofill reconciler.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::errors::Result,
    ledger::{autofill_candidates, reconcile, Book, BudgetEntry, Month},
};

use super::parse_month_field;

/// Autofill request payload: `{ "month": "YYYY-MM" }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutofillRequest {
    #[serde(default)]
    pub month: Option<String>,
}

pub struct AutofillService;

impl AutofillService {
    pub fn run(book: &mut Book, request: &AutofillRequest) -> Result<Vec<BudgetEntry>> {
        let month = parse_month_field("month", request.month.as_deref())?;
        Ok(Self::fill_month(book, month))
    }

    /// Materializes every rule active in `month` that has no entry yet and returns
    /// the entries created by this call.
    ///
    /// The duplicate check is a read-then-write over the book; concurrent writers of
    /// the same book are not coordinated.
    pub fn fill_month(book: &mut Book, month: Month) -> Vec<BudgetEntry> {
        let candidates = autofill_candidates(&book.rules, month);
        let proposed = candidates.len();
        let created = {
            let existing = book.entries_between(month.start(), month.end_exclusive());
            reconcile(candidates, &existing)
        };
        for entry in &created {
            book.add_entry(entry.clone());
        }
        info!(
            month = %month,
            proposed,
            created = created.len(),
            "autofill completed"
        );
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::errors::PlanError,
        ledger::{BudgetRule, FlowKind},
    };

    #[test]
    fn run_requires_a_month() {
        let mut book = Book::new("Autofill");
        let err = AutofillService::run(&mut book, &AutofillRequest::default()).unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));
    }

    #[test]
    fn second_run_creates_nothing() {
        let mut book = Book::new("Autofill");
        let start = Month::new(2025, 1).unwrap();
        book.add_rule(BudgetRule::new(FlowKind::Income, "Salary", 5000.0, start));
        book.add_rule(BudgetRule::new(FlowKind::Expense, "Rent", 1800.0, start).growing(0.03));

        let request = AutofillRequest {
            month: Some("2025-09".into()),
        };
        let first = AutofillService::run(&mut book, &request).unwrap();
        assert_eq!(first.len(), 2);
        let second = AutofillService::run(&mut book, &request).unwrap();
        assert!(second.is_empty());
        assert_eq!(book.entries.len(), 2);
    }
}
