mod common;

use common::{expense, income, month, setup_storage};
use plan_core::{
    core::services::{AutofillRequest, AutofillService, EntryService},
    ledger::{Book, BudgetEntry, FlowKind, NewEntry, AUTOFILL_NOTE},
    storage::PlanStorage,
};

fn household() -> Book {
    let mut book = Book::new("Household");
    book.add_rule(income("Salary", 4200.0, "2025-01"));
    book.add_rule(expense("Rent", 1500.0, "2025-01").growing(0.05));
    book.add_rule(expense("Gym", 40.0, "2024-01").ending(month("2024-12")));
    book
}

#[test]
fn autofill_creates_one_entry_per_active_rule() {
    let mut book = household();
    let created = AutofillService::fill_month(&mut book, month("2025-03"));

    assert_eq!(created.len(), 2);
    for entry in &created {
        assert_eq!(entry.date, month("2025-03").start());
        assert_eq!(entry.note, AUTOFILL_NOTE);
        assert_eq!(entry.autofill.map(|key| key.month), Some(month("2025-03")));
    }
    let rent = created.iter().find(|entry| entry.category == "Rent").unwrap();
    assert!(rent.amount > 1500.0);
    assert_eq!(book.entries.len(), 2);
}

#[test]
fn second_run_for_the_same_month_creates_nothing() {
    let mut book = household();
    let request = AutofillRequest {
        month: Some("2025-03".into()),
    };
    let first = AutofillService::run(&mut book, &request).unwrap();
    let second = AutofillService::run(&mut book, &request).unwrap();
    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(book.entries.len(), 2);
}

#[test]
fn editing_an_autofilled_amount_keeps_it_deduplicated() {
    let mut book = household();
    let created = AutofillService::fill_month(&mut book, month("2025-03"));
    let salary = created
        .iter()
        .find(|entry| entry.kind == FlowKind::Income)
        .unwrap();

    EntryService::replace(
        &mut book,
        salary.id,
        NewEntry {
            date: Some("2025-03-01".into()),
            kind: Some(FlowKind::Income),
            category: Some("Salary".into()),
            amount: Some(4350.0),
            note: Some("bonus month".into()),
        },
    )
    .unwrap();

    let rerun = AutofillService::fill_month(&mut book, month("2025-03"));
    assert!(rerun.is_empty());
}

#[test]
fn legacy_entries_without_keys_still_count() {
    let mut book = Book::new("Legacy");
    book.add_rule(expense("Rent", 1500.0, "2025-01"));
    book.add_entry(
        BudgetEntry::new(month("2025-02").start(), FlowKind::Expense, "Rent", 1500.0)
            .with_note(AUTOFILL_NOTE),
    );

    assert!(AutofillService::fill_month(&mut book, month("2025-02")).is_empty());
    assert_eq!(AutofillService::fill_month(&mut book, month("2025-03")).len(), 1);
}

#[test]
fn manual_entries_do_not_block_autofill() {
    let mut book = Book::new("Manual");
    book.add_rule(expense("Rent", 1500.0, "2025-01"));
    book.add_entry(BudgetEntry::new(
        month("2025-02").start(),
        FlowKind::Expense,
        "Rent",
        1500.0,
    ));

    assert_eq!(AutofillService::fill_month(&mut book, month("2025-02")).len(), 1);
}

#[test]
fn dedup_survives_a_storage_round_trip() {
    let (storage, _base) = setup_storage(3);
    let mut book = household();
    AutofillService::fill_month(&mut book, month("2025-04"));
    storage.save_book("household", &book).unwrap();

    let mut reloaded = storage.load_book("household").unwrap();
    assert!(AutofillService::fill_month(&mut reloaded, month("2025-04")).is_empty());
}

#[test]
fn missing_month_is_a_validation_error() {
    let mut book = household();
    let err = AutofillService::run(&mut book, &AutofillRequest::default()).unwrap_err();
    assert_eq!(err.status_code(), 400);
    let err = AutofillService::run(
        &mut book,
        &AutofillRequest {
            month: Some("2025-13".into()),
        },
    )
    .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
