//! Domain models, month arithmetic and the recurring-rule engine.

pub mod asset;
pub mod autofill;
pub mod book;
pub mod cash_flow;
pub mod entry;
pub mod month;
pub mod rule;
pub mod snapshot;

pub use asset::{Asset, Compounding, Contribution, ContributionCadence, NewAsset};
pub use autofill::{autofill_candidates, reconcile};
pub use book::Book;
pub use cash_flow::{cash_flow_for_month, MonthlyCashFlow};
pub use entry::{AutofillKey, BudgetEntry, NewEntry, AUTOFILL_NOTE};
pub use month::{months_between, Month};
pub use rule::{BudgetRule, FlowKind, NewRule};
pub use snapshot::Snapshot;
