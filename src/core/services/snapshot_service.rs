//! Net-worth snapshots.

use tracing::info;
use uuid::Uuid;

use crate::{
    core::{
        errors::{PlanError, Result},
        time::Clock,
    },
    ledger::{Book, Snapshot},
};

pub struct SnapshotService;

impl SnapshotService {
    /// Records the current total asset value, timestamped by `clock`.
    pub fn take(book: &mut Book, clock: &dyn Clock) -> Snapshot {
        let snapshot = Snapshot::new(book.total_asset_value(), clock.now());
        info!(total_value = snapshot.total_value, "snapshot recorded");
        book.add_snapshot(snapshot.clone());
        snapshot
    }

    /// Snapshots in chronological order.
    pub fn list(book: &Book) -> Vec<&Snapshot> {
        let mut snapshots: Vec<&Snapshot> = book.snapshots.iter().collect();
        snapshots.sort_by_key(|snap| snap.taken_at);
        snapshots
    }

    pub fn remove(book: &mut Book, id: Uuid) -> Result<Snapshot> {
        book.remove_snapshot(id)
            .ok_or_else(|| PlanError::not_found("Snapshot", id))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{core::time::FixedClock, ledger::Asset};

    #[test]
    fn take_records_total_asset_value() {
        let mut book = Book::new("Snapshots");
        book.add_asset(Asset::new("Cash", 500.0, 500.0));
        book.add_asset(Asset::new("Fund", 1_000.0, 1_400.0));
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());

        let snapshot = SnapshotService::take(&mut book, &clock);
        assert_eq!(snapshot.total_value, 1_900.0);
        assert_eq!(snapshot.taken_at, clock.now());
        assert_eq!(SnapshotService::list(&book).len(), 1);
    }

    #[test]
    fn list_is_chronological() {
        let mut book = Book::new("Snapshots");
        let later = FixedClock::on(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        let earlier = FixedClock::on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        SnapshotService::take(&mut book, &later);
        SnapshotService::take(&mut book, &earlier);

        let listed = SnapshotService::list(&book);
        assert!(listed[0].taken_at < listed[1].taken_at);
    }
}
