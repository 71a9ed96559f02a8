use crate::{
    cli::{
        args::{parse_id, parse_number, ParsedArgs},
        context::{CliContext, CommandResult},
        output,
    },
    core::services::RuleService,
    ledger::{FlowKind, NewRule},
};

use super::{subcommand, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "rule",
        "Manage recurring budget rules",
        "rule add <income|expense> <category> <amount> [--start YYYY-MM] [--end YYYY-MM] [--growth RATE] [--note TEXT]\n  rule list [--json]\n  rule remove <id>",
        cmd_rule,
    )]
}

fn cmd_rule(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match subcommand("rule", args, &["add", "list", "remove"])? {
        ("add", rest) => add_rule(context, rest),
        ("list", rest) => list_rules(context, rest),
        (_, rest) => remove_rule(context, rest),
    }
}

fn add_rule(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["start", "end", "growth", "note"], &[])?;
    let kind = parsed
        .required(0, "income|expense")?
        .parse::<FlowKind>()?;
    let category = parsed.required(1, "category")?.to_string();
    let amount = parse_number("amount", parsed.required(2, "amount")?)?;
    let start_month = parsed
        .option("start")
        .map(str::to_string)
        .unwrap_or_else(|| context.clock.current_month().to_string());

    let rule = RuleService::create(
        &mut context.book,
        NewRule {
            kind: Some(kind),
            category: Some(category),
            amount: Some(amount),
            start_month: Some(start_month),
            end_month: parsed.option("end").map(str::to_string),
            growth_rate: parsed.number("growth")?,
            note: parsed.option("note").map(str::to_string),
        },
    )?;
    context.persist()?;
    output::success(format!(
        "Added {} rule `{}` ({}, {}) with id {}",
        rule.kind,
        rule.category,
        context.money(rule.amount),
        rule.window_label(),
        rule.id
    ));
    Ok(())
}

fn list_rules(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &["json"])?;
    let rules = RuleService::list(&context.book);
    if parsed.switch("json") {
        output::json(&rules)?;
        return Ok(());
    }
    if rules.is_empty() {
        output::info("No rules defined.");
        return Ok(());
    }
    output::section("Rules");
    for rule in rules {
        let growth = if rule.growth_rate == 0.0 {
            String::new()
        } else {
            format!(" growth {:.2}%/yr", rule.growth_rate * 100.0)
        };
        output::info(format!(
            "{}  {:<7} {:<16} {:>14}  {}{}",
            rule.id,
            rule.kind.label(),
            rule.category,
            context.money(rule.amount),
            rule.window_label(),
            growth
        ));
    }
    Ok(())
}

fn remove_rule(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[], &[])?;
    let id = parse_id(parsed.required(0, "id")?)?;
    let removed = RuleService::remove(&mut context.book, id)?;
    context.persist()?;
    output::success(format!("Removed rule `{}` ({})", removed.category, removed.id));
    Ok(())
}
