use serde::{Deserialize, Serialize};

use super::{month::Month, rule::BudgetRule, FlowKind};

/// Income, expense and net totals for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    pub month: Month,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl MonthlyCashFlow {
    pub fn empty(month: Month) -> Self {
        Self {
            month,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        }
    }

    /// Adds `amount` to the bucket for `kind` and refreshes `net`.
    pub fn record(&mut self, kind: FlowKind, amount: f64) {
        match kind {
            FlowKind::Income => self.income += amount,
            FlowKind::Expense => self.expense += amount,
        }
        self.net = self.income - self.expense;
    }
}

/// Sums the growth-adjusted amounts of every rule active in `month`.
pub fn cash_flow_for_month(rules: &[BudgetRule], month: Month) -> MonthlyCashFlow {
    let mut flow = MonthlyCashFlow::empty(month);
    for rule in rules.iter().filter(|rule| rule.is_active(month)) {
        flow.record(rule.kind, rule.amount_at(month));
    }
    flow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(year: i32, month: u32) -> Month {
        Month::new(year, month).unwrap()
    }

    #[test]
    fn sums_active_rules_by_kind() {
        let rules = vec![
            BudgetRule::new(FlowKind::Income, "Salary", 5000.0, m(2025, 1)),
            BudgetRule::new(FlowKind::Expense, "Rent", 1800.0, m(2025, 1)),
            BudgetRule::new(FlowKind::Expense, "Daycare", 700.0, m(2025, 1)).ending(m(2025, 2)),
            BudgetRule::new(FlowKind::Income, "Pension", 2000.0, m(2040, 1)),
        ];

        let flow = cash_flow_for_month(&rules, m(2025, 2));
        assert_eq!(flow.income, 5000.0);
        assert_eq!(flow.expense, 2500.0);
        assert_eq!(flow.net, 2500.0);

        let later = cash_flow_for_month(&rules, m(2025, 3));
        assert_eq!(later.expense, 1800.0);
        assert_eq!(later.net, 3200.0);
    }

    #[test]
    fn no_rules_yield_zero_flow() {
        let flow = cash_flow_for_month(&[], m(2025, 1));
        assert_eq!(flow, MonthlyCashFlow::empty(m(2025, 1)));
    }
}
