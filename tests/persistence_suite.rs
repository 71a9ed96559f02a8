mod common;

use std::fs;

use common::{expense, income, setup_storage, temp_base};
use plan_core::{
    config::{Config, ConfigManager},
    core::errors::PlanError,
    ledger::{Asset, Book},
    storage::{JsonStorage, PlanStorage},
};

fn sample_book() -> Book {
    let mut book = Book::new("Household");
    book.add_rule(income("Salary", 4200.0, "2025-01"));
    book.add_rule(expense("Rent", 1500.0, "2025-01").growing(0.02));
    book.add_asset(Asset::new("Index fund", 9000.0, 11_250.0));
    book
}

#[test]
fn books_round_trip_through_json() {
    let (storage, _base) = setup_storage(3);
    let book = sample_book();
    storage.save_book("household", &book).expect("save book");

    let loaded = storage.load_book("household").expect("load book");
    assert_eq!(loaded.rules, book.rules);
    assert_eq!(loaded.assets, book.assets);
    assert_eq!(storage.list_books().unwrap(), vec!["household".to_string()]);
}

#[test]
fn overwriting_backs_up_previous_file_and_prunes() {
    let (storage, _base) = setup_storage(2);
    let mut book = sample_book();
    for _ in 0..5 {
        book.add_rule(expense("Coffee", 30.0, "2025-02"));
        storage.save_book("household", &book).expect("save book");
    }

    let backups = storage.list_backups("household").expect("list backups");
    assert_eq!(backups.len(), 2);
    let newest = storage.restore_backup(&backups[0]).expect("restore backup");
    assert_eq!(newest.rules.len(), book.rules.len() - 1);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (storage, _base) = setup_storage(2);
    let book = sample_book();
    storage.save_book("reliable", &book).expect("initial save");
    let path = storage.book_path("reliable");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp path makes File::create fail.
    let tmp_path = path.with_extension("json.tmp");
    fs::create_dir_all(&tmp_path).unwrap();

    let mut changed = book.clone();
    changed.add_rule(expense("Boat", 900.0, "2025-06"));
    let err = storage.save_book("reliable", &changed).unwrap_err();
    assert!(matches!(err, PlanError::Storage(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn deleting_books_reports_missing_ones() {
    let (storage, _base) = setup_storage(2);
    storage.save_book("scratch", &Book::new("Scratch")).unwrap();
    storage.delete_book("scratch").unwrap();
    assert!(storage.load_book("scratch").unwrap_err().is_not_found());
    assert!(storage.delete_book("scratch").unwrap_err().is_not_found());
}

#[test]
fn newer_schema_versions_are_rejected() {
    let (storage, _base) = setup_storage(2);
    let mut book = Book::new("Future");
    book.schema_version = 99;
    storage.save_book("future", &book).unwrap();
    let err = storage.load_book("future").unwrap_err();
    assert!(matches!(err, PlanError::Storage(message) if message.contains("newer schema")));
}

#[test]
fn storage_follows_config_data_dir() {
    let base = temp_base();
    let custom = base.join("elsewhere");
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let config = Config {
        data_dir: Some(custom.clone()),
        backup_retention: 1,
        currency: "EUR".into(),
        ..Config::default()
    };
    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.currency, "EUR");
    let storage = JsonStorage::from_config(&base, &loaded).unwrap();
    assert_eq!(storage.retention(), 1);
    storage.save_book("household", &sample_book()).unwrap();
    assert!(custom.join("household.json").exists());
}

#[test]
fn malformed_config_is_a_config_error() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base).unwrap();
    fs::write(manager.path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(PlanError::Config(_))));
}
