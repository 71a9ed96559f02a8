use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::{months_between, Month};
use crate::core::errors::PlanError;

/// Direction of a cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Income,
    #[default]
    Expense,
}

impl FlowKind {
    pub fn label(&self) -> &'static str {
        match self {
            FlowKind::Income => "income",
            FlowKind::Expense => "expense",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlowKind {
    type Err = PlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(FlowKind::Income),
            "expense" | "out" => Ok(FlowKind::Expense),
            other => Err(PlanError::validation(format!(
                "unknown flow type `{other}`, expected income or expense"
            ))),
        }
    }
}

/// A recurring monthly cash-flow template.
///
/// `amount` is the nominal value at `start_month`. A non-zero `growth_rate` is an
/// annual rate applied fractionally per elapsed month, see [`BudgetRule::amount_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRule {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: FlowKind,
    pub category: String,
    pub amount: f64,
    pub start_month: Month,
    #[serde(default)]
    pub end_month: Option<Month>,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub note: String,
}

impl BudgetRule {
    pub fn new(
        kind: FlowKind,
        category: impl Into<String>,
        amount: f64,
        start_month: Month,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category: category.into(),
            amount,
            start_month,
            end_month: None,
            growth_rate: 0.0,
            note: String::new(),
        }
    }

    pub fn ending(mut self, end_month: Month) -> Self {
        self.end_month = Some(end_month);
        self
    }

    pub fn growing(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether `month` falls inside the inclusive rule window.
    pub fn is_active(&self, month: Month) -> bool {
        if month < self.start_month {
            return false;
        }
        match self.end_month {
            Some(end) => month <= end,
            None => true,
        }
    }

    /// Growth-adjusted amount for `month`: `amount * (1 + g)^(elapsed_months / 12)`.
    ///
    /// The result for months before `start_month` is defined but meaningless; gate
    /// with [`BudgetRule::is_active`] or use [`BudgetRule::amount_for`].
    pub fn amount_at(&self, month: Month) -> f64 {
        if self.growth_rate == 0.0 {
            return self.amount;
        }
        let elapsed = months_between(self.start_month, month);
        self.amount * (1.0 + self.growth_rate).powf(elapsed as f64 / 12.0)
    }

    pub fn amount_for(&self, month: Month) -> Option<f64> {
        self.is_active(month).then(|| self.amount_at(month))
    }

    pub fn window_label(&self) -> String {
        match self.end_month {
            Some(end) => format!("{} .. {}", self.start_month, end),
            None => format!("{} ..", self.start_month),
        }
    }
}

/// Rule creation payload. Months arrive as raw strings so malformed values surface
/// as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRule {
    #[serde(rename = "type", default)]
    pub kind: Option<FlowKind>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub start_month: Option<String>,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub growth_rate: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(year: i32, month: u32) -> Month {
        Month::new(year, month).unwrap()
    }

    #[test]
    fn flat_rule_returns_nominal_amount_in_every_active_month() {
        let rule = BudgetRule::new(FlowKind::Income, "Salary", 5000.0, m(2025, 1));
        for offset in [0, 1, 11, 12, 240] {
            assert_eq!(rule.amount_at(m(2025, 1).add_months(offset)), 5000.0);
        }
    }

    #[test]
    fn single_month_window_is_active_only_in_that_month() {
        let rule = BudgetRule::new(FlowKind::Expense, "Insurance", 900.0, m(2025, 3)).ending(m(2025, 3));
        assert!(!rule.is_active(m(2025, 2)));
        assert!(rule.is_active(m(2025, 3)));
        assert!(!rule.is_active(m(2025, 4)));
    }

    #[test]
    fn end_month_is_inclusive() {
        let rule = BudgetRule::new(FlowKind::Expense, "Rent", 1500.0, m(2024, 1)).ending(m(2025, 6));
        assert!(rule.is_active(m(2025, 6)));
        assert!(!rule.is_active(m(2025, 7)));
        assert_eq!(rule.amount_for(m(2025, 7)), None);
    }

    #[test]
    fn growth_compounds_fractionally_per_month() {
        let rule = BudgetRule::new(FlowKind::Expense, "Rent", 1000.0, m(2025, 1)).growing(0.03);
        assert!((rule.amount_at(m(2026, 1)) - 1030.0).abs() < 1e-9);
        let half_year = 1000.0 * 1.03_f64.powf(0.5);
        assert!((rule.amount_at(m(2025, 7)) - half_year).abs() < 1e-9);
    }

    #[test]
    fn positive_growth_is_strictly_increasing() {
        let rule = BudgetRule::new(FlowKind::Income, "Salary", 4000.0, m(2025, 1)).growing(0.02);
        let mut previous = rule.amount_at(m(2025, 1));
        for offset in 1..=120 {
            let current = rule.amount_at(m(2025, 1).add_months(offset));
            assert!(current > previous, "offset {offset}");
            previous = current;
        }
    }

    #[test]
    fn flow_kind_parses_labels() {
        assert_eq!("Income".parse::<FlowKind>().unwrap(), FlowKind::Income);
        assert_eq!("expense".parse::<FlowKind>().unwrap(), FlowKind::Expense);
        assert!("transfer".parse::<FlowKind>().is_err());
    }
}
