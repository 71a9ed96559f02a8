use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{month::Month, rule::FlowKind};

/// Note stamped on entries materialized by autofill.
pub const AUTOFILL_NOTE: &str = "auto-filled";

/// Identifies the rule and month an autofilled entry was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutofillKey {
    pub rule_id: Uuid,
    pub month: Month,
}

/// A concrete ledger line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autofill: Option<AutofillKey>,
}

impl BudgetEntry {
    pub fn new(date: NaiveDate, kind: FlowKind, category: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.into(),
            amount,
            note: String::new(),
            autofill: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn month(&self) -> Month {
        Month::containing(self.date)
    }

    pub fn carries_autofill_note(&self) -> bool {
        self.note == AUTOFILL_NOTE
    }
}

/// Entry creation payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<FlowKind>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}
