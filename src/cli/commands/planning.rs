use crate::{
    cli::{
        args::ParsedArgs,
        context::{CliContext, CommandResult},
        output,
    },
    core::services::{AutofillRequest, AutofillService, PlanService},
    ledger::Month,
    simulation::{Projection, ProjectionRequest},
};

use super::{entries::print_flow, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "cashflow",
            "Show rule-derived income, expense and net for a month",
            "cashflow <YYYY-MM> [--json]",
            cmd_cashflow,
        ),
        CommandDefinition::new(
            "project",
            "Project wealth from the recurring rules",
            "project [--years N] [--return RATE] [--start-value AMOUNT] [--start-month YYYY-MM] [--monthly] [--json]",
            cmd_project,
        ),
        CommandDefinition::new(
            "autofill",
            "Materialize active rules into entries for a month",
            "autofill <YYYY-MM> [--json]",
            cmd_autofill,
        ),
    ]
}

fn cmd_cashflow(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    let month = Month::parse(parsed.required(0, "month")?)?;
    let flow = PlanService::cash_flow(&context.book, month);
    if parsed.switch("json") {
        output::json(&flow)?;
        return Ok(());
    }
    print_flow(context, "Planned", &flow);
    Ok(())
}

fn cmd_project(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(
        args,
        &["years", "return", "start-value", "start-month"],
        &["json", "monthly"],
    )?;
    let request = ProjectionRequest {
        years: parsed.integer("years")?,
        annual_return: parsed.number("return")?,
        start_value: parsed.number("start-value")?,
        start_month: parsed.option("start-month").map(str::to_string),
    };
    let defaults = context.projection_defaults();
    let projection = PlanService::project(
        &context.book,
        &request,
        &defaults,
        context.clock.as_ref(),
    )?;

    if parsed.switch("json") {
        output::json(&projection)?;
        return Ok(());
    }
    print_projection(context, &projection, parsed.switch("monthly"));
    Ok(())
}

fn print_projection(context: &CliContext, projection: &Projection, monthly: bool) {
    let params = &projection.params;
    output::section(format!(
        "Projection from {} over {} year(s) at {:.2}%/yr",
        params.start_month,
        params.years,
        params.annual_return * 100.0
    ));
    output::info(format!("Starting value: {}", context.money(params.start_value)));
    output::info(format!(
        "{:<8} {:>14} {:>14} {:>14} {:>16}",
        "Month", "Income", "Expense", "Net", "Wealth"
    ));
    let last = projection.points.len().saturating_sub(1);
    for (index, point) in projection.points.iter().enumerate() {
        // one row per year unless every month was requested
        if !monthly && (index + 1) % 12 != 0 && index != last {
            continue;
        }
        output::info(format!(
            "{:<8} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            point.month.to_string(),
            point.income,
            point.expense,
            point.net,
            point.wealth
        ));
    }
    output::info(format!(
        "Final wealth: {}",
        context.money(projection.final_wealth())
    ));
}

fn cmd_autofill(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    let request = AutofillRequest {
        month: Some(parsed.required(0, "month")?.to_string()),
    };
    let created = AutofillService::run(&mut context.book, &request)?;
    if !created.is_empty() {
        context.persist()?;
    }

    if parsed.switch("json") {
        output::json(&created)?;
        return Ok(());
    }
    if created.is_empty() {
        output::info("Nothing to autofill; every active rule already has an entry.");
        return Ok(());
    }
    let noun = if created.len() == 1 { "entry" } else { "entries" };
    output::success(format!("Created {} {noun}", created.len()));
    for entry in &created {
        output::info(format!(
            "{}  {}  {:<7} {:<16} {:>14}",
            entry.id,
            entry.date,
            entry.kind.label(),
            entry.category,
            context.money(entry.amount)
        ));
    }
    Ok(())
}
