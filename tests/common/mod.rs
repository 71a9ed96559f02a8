#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use plan_core::{
    ledger::{BudgetRule, FlowKind, Month},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage rooted in an isolated directory with the given retention.
pub fn setup_storage(retention: usize) -> (JsonStorage, PathBuf) {
    let base = temp_base();
    let storage = JsonStorage::new(base.join("books"), base.join("backups"), Some(retention))
        .expect("create json storage backend");
    (storage, base)
}

pub fn month(raw: &str) -> Month {
    Month::parse(raw).expect("valid month")
}

pub fn income(category: &str, amount: f64, start: &str) -> BudgetRule {
    BudgetRule::new(FlowKind::Income, category, amount, month(start))
}

pub fn expense(category: &str, amount: f64, start: &str) -> BudgetRule {
    BudgetRule::new(FlowKind::Expense, category, amount, month(start))
}
