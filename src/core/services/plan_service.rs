//! Boundary for wealth projections: resolves defaults, enforces the horizon cap and
//! hands a rule snapshot to the [`ProjectionEngine`].

use tracing::info;

use super::{parse_optional_month, require_finite, require_rate, RuleService};
use crate::{
    config::Config,
    core::{
        errors::{PlanError, Result},
        time::Clock,
    },
    ledger::{cash_flow_for_month, Book, Month, MonthlyCashFlow},
    simulation::{Projection, ProjectionEngine, ProjectionParams, ProjectionRequest},
};

/// Fallbacks applied to omitted request fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionDefaults {
    pub years: u32,
    pub annual_return: f64,
    pub max_years: u32,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            years: 30,
            annual_return: 0.06,
            max_years: 100,
        }
    }
}

impl From<&Config> for ProjectionDefaults {
    fn from(config: &Config) -> Self {
        Self {
            years: config.default_projection_years,
            annual_return: config.default_annual_return,
            max_years: config.max_projection_years,
        }
    }
}

pub struct PlanService;

impl PlanService {
    /// Resolves `request` into concrete parameters.
    ///
    /// Omitted `start_value` falls back to the book's total asset value and omitted
    /// `start_month` to the clock's current month.
    pub fn resolve(
        book: &Book,
        request: &ProjectionRequest,
        defaults: &ProjectionDefaults,
        clock: &dyn Clock,
    ) -> Result<ProjectionParams> {
        let years = match request.years {
            Some(years) if years < 0 => {
                return Err(PlanError::validation(format!(
                    "`years` must not be negative, got {years}"
                )))
            }
            Some(years) if years > i64::from(defaults.max_years) => {
                return Err(PlanError::validation(format!(
                    "`years` must be at most {}, got {years}",
                    defaults.max_years
                )))
            }
            Some(years) => years as u32,
            None => defaults.years,
        };
        let annual_return = require_rate(
            "annual_return",
            request.annual_return.unwrap_or(defaults.annual_return),
        )?;
        let start_value = match request.start_value {
            Some(value) => require_finite("start_value", value)?,
            None => book.total_asset_value(),
        };
        let start_month = parse_optional_month(request.start_month.as_deref())?
            .unwrap_or_else(|| clock.current_month());

        let params = ProjectionParams {
            years,
            annual_return,
            start_value,
            start_month,
        };
        let last_offset = i32::try_from(params.months() - 1).unwrap_or(i32::MAX);
        if start_month.checked_add_months(last_offset).is_none() {
            return Err(PlanError::validation(format!(
                "a {years}-year projection from {start_month} runs past year 9999"
            )));
        }
        Ok(params)
    }

    pub fn project(
        book: &Book,
        request: &ProjectionRequest,
        defaults: &ProjectionDefaults,
        clock: &dyn Clock,
    ) -> Result<Projection> {
        let params = Self::resolve(book, request, defaults, clock)?;
        let rules = RuleService::snapshot(book);
        let projection = ProjectionEngine::run(&rules, params);
        info!(
            start_month = %params.start_month,
            years = params.years,
            points = projection.points.len(),
            final_wealth = projection.final_wealth(),
            "projection computed"
        );
        Ok(projection)
    }

    /// Rule-derived cash flow for a single month.
    pub fn cash_flow(book: &Book, month: Month) -> MonthlyCashFlow {
        cash_flow_for_month(&book.rules, month)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        core::time::FixedClock,
        ledger::{Asset, BudgetRule, FlowKind},
    };

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap())
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let mut book = Book::new("Plan");
        book.add_asset(Asset::new("Savings", 20_000.0, 25_000.0));

        let params = PlanService::resolve(
            &book,
            &ProjectionRequest::default(),
            &ProjectionDefaults::default(),
            &clock(),
        )
        .unwrap();

        assert_eq!(params.years, 30);
        assert_eq!(params.annual_return, 0.06);
        assert_eq!(params.start_value, 25_000.0);
        assert_eq!(params.start_month, Month::new(2025, 10).unwrap());
    }

    #[test]
    fn years_above_cap_are_rejected() {
        let book = Book::new("Plan");
        let request = ProjectionRequest {
            years: Some(101),
            ..ProjectionRequest::default()
        };
        let err = PlanService::project(&book, &request, &ProjectionDefaults::default(), &clock())
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(ref message) if message.contains("at most 100")));

        let negative = ProjectionRequest {
            years: Some(-1),
            ..ProjectionRequest::default()
        };
        assert!(PlanService::project(&book, &negative, &ProjectionDefaults::default(), &clock()).is_err());
    }

    #[test]
    fn zero_years_produce_a_single_point() {
        let book = Book::new("Plan");
        let request = ProjectionRequest {
            years: Some(0),
            ..ProjectionRequest::default()
        };
        let projection =
            PlanService::project(&book, &request, &ProjectionDefaults::default(), &clock()).unwrap();
        assert_eq!(projection.points.len(), 1);
        assert_eq!(projection.params.years, 0);
    }

    #[test]
    fn explicit_start_month_overrides_clock() {
        let mut book = Book::new("Plan");
        let start = Month::new(2030, 1).unwrap();
        book.add_rule(BudgetRule::new(FlowKind::Income, "Pension", 2_000.0, start));
        let request = ProjectionRequest {
            years: Some(1),
            annual_return: Some(0.0),
            start_value: Some(0.0),
            start_month: Some("2029-12".into()),
        };
        let projection =
            PlanService::project(&book, &request, &ProjectionDefaults::default(), &clock()).unwrap();
        assert_eq!(projection.points[0].month, Month::new(2029, 12).unwrap());
        assert_eq!(projection.points[0].income, 0.0);
        assert_eq!(projection.points[1].income, 2_000.0);
        assert!((projection.final_wealth() - 22_000.0).abs() < 1e-9);
    }

    #[test]
    fn horizon_past_year_9999_is_rejected() {
        let book = Book::new("Plan");
        let request = ProjectionRequest {
            years: Some(2),
            start_month: Some("9999-12".into()),
            ..ProjectionRequest::default()
        };
        let err = PlanService::project(&book, &request, &ProjectionDefaults::default(), &clock())
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(ref message) if message.contains("9999")));

        let fits = ProjectionRequest {
            years: Some(1),
            start_month: Some("9999-01".into()),
            ..ProjectionRequest::default()
        };
        let projection =
            PlanService::project(&book, &fits, &ProjectionDefaults::default(), &clock()).unwrap();
        let last = projection.points.last().unwrap();
        assert_eq!(last.month, Month::new(9999, 12).unwrap());
        let json = serde_json::to_string(last).unwrap();
        let back: crate::simulation::ProjectionPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, last);
    }

    #[test]
    fn annual_return_must_exceed_minus_one() {
        let book = Book::new("Plan");
        let request = ProjectionRequest {
            annual_return: Some(-1.5),
            ..ProjectionRequest::default()
        };
        assert!(PlanService::resolve(&book, &request, &ProjectionDefaults::default(), &clock()).is_err());
    }
}
