use tracing::debug;

use crate::ledger::{cash_flow_for_month, BudgetRule, Month};

use super::types::{Projection, ProjectionParams, ProjectionPoint};

/// Month-by-month wealth simulator over a fixed rule snapshot.
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// Monthly rate whose twelve-fold compounding equals `annual_return`.
    pub fn monthly_rate(annual_return: f64) -> f64 {
        (1.0 + annual_return).powf(1.0 / 12.0) - 1.0
    }

    /// Runs the simulation for `months` steps (at least one) starting at `start`.
    ///
    /// Each step compounds the balance by the monthly rate, then adds the month's
    /// net cash flow. Points carry the end-of-month balance.
    pub fn simulate(
        rules: &[BudgetRule],
        start: Month,
        months: u32,
        annual_return: f64,
        start_value: f64,
    ) -> Vec<ProjectionPoint> {
        let steps = months.max(1);
        let rate = Self::monthly_rate(annual_return);
        let mut wealth = start_value;
        let mut month = start;
        let mut points = Vec::with_capacity(steps as usize);

        for _ in 0..steps {
            let flow = cash_flow_for_month(rules, month);
            wealth = wealth * (1.0 + rate) + flow.net;
            points.push(ProjectionPoint {
                month,
                income: flow.income,
                expense: flow.expense,
                net: flow.net,
                wealth,
            });
            month = month.next();
        }

        debug!(
            start = %start,
            steps,
            rules = rules.len(),
            final_wealth = wealth,
            "projection simulated"
        );
        points
    }

    pub fn run(rules: &[BudgetRule], params: ProjectionParams) -> Projection {
        let points = Self::simulate(
            rules,
            params.start_month,
            params.months(),
            params.annual_return,
            params.start_value,
        );
        Projection { params, points }
    }
}
