//! Business logic helpers for recurring budget rules.

use tracing::info;
use uuid::Uuid;

use super::{
    normalize_label, normalize_note, parse_month_field, parse_optional_month, require,
    require_finite, require_rate,
};
use crate::{
    core::errors::{PlanError, Result},
    ledger::{Book, BudgetRule, NewRule},
};

/// Provides validated CRUD helpers for [`BudgetRule`] entities.
pub struct RuleService;

impl RuleService {
    /// Validates `input` and stores a new rule.
    pub fn create(book: &mut Book, input: NewRule) -> Result<BudgetRule> {
        let rule = Self::build(Uuid::new_v4(), input)?;
        info!(rule_id = %rule.id, category = %rule.category, "budget rule created");
        book.add_rule(rule.clone());
        Ok(rule)
    }

    /// Replaces every field of an existing rule, keeping its id.
    pub fn replace(book: &mut Book, id: Uuid, input: NewRule) -> Result<BudgetRule> {
        let rule = Self::build(id, input)?;
        let slot = book
            .rule_mut(id)
            .ok_or_else(|| PlanError::not_found("Rule", id))?;
        *slot = rule.clone();
        book.touch();
        info!(rule_id = %id, category = %rule.category, "budget rule updated");
        Ok(rule)
    }

    pub fn remove(book: &mut Book, id: Uuid) -> Result<BudgetRule> {
        let removed = book
            .remove_rule(id)
            .ok_or_else(|| PlanError::not_found("Rule", id))?;
        info!(rule_id = %id, "budget rule deleted");
        Ok(removed)
    }

    /// Rules ordered by start month; ties keep insertion order.
    pub fn list(book: &Book) -> Vec<&BudgetRule> {
        let mut rules: Vec<&BudgetRule> = book.rules.iter().collect();
        rules.sort_by_key(|rule| rule.start_month);
        rules
    }

    /// Owned copy of the ordered rule set, suitable as a simulation input.
    pub fn snapshot(book: &Book) -> Vec<BudgetRule> {
        Self::list(book).into_iter().cloned().collect()
    }

    fn build(id: Uuid, input: NewRule) -> Result<BudgetRule> {
        let amount = require_finite("amount", require("amount", input.amount)?)?;
        let start_month = parse_month_field("start_month", input.start_month.as_deref())?;
        let end_month = parse_optional_month(input.end_month.as_deref())?;
        if let Some(end) = end_month {
            if end < start_month {
                return Err(PlanError::validation(format!(
                    "end_month {end} precedes start_month {start_month}"
                )));
            }
        }
        let growth_rate = require_rate("growth_rate", input.growth_rate.unwrap_or(0.0))?;

        Ok(BudgetRule {
            id,
            kind: input.kind.unwrap_or_default(),
            category: normalize_label(input.category),
            amount,
            start_month,
            end_month,
            growth_rate,
            note: normalize_note(input.note),
        })
    }
}
